//! # HTTP Server
//!
//! Combines the public, admin and health routers behind CORS and request
//! tracing, and serves them until a shutdown signal arrives.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use super::admin_routes::{admin_routes, AdminState};
use super::observability_routes::health_routes;
use super::survey_routes::{survey_routes, SurveyState};
use crate::auth::{AdminGate, CaptchaVerifier};
use crate::config::HttpServerConfig;
use crate::observability::Event;
use crate::store::SurveyStore;

/// Collaborators injected into the handlers
#[derive(Clone)]
pub struct AppServices {
    pub store: SurveyStore,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub admin: AdminGate,
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %s, "ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the full application router.
pub fn build_router(services: AppServices, config: &HttpServerConfig) -> Router {
    let survey_state = Arc::new(SurveyState::new(services.store.clone(), services.captcha));
    let admin_state = Arc::new(AdminState::new(services.store.clone(), services.admin));

    // path only: the query string may carry the admin credential
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            path = %request.uri().path(),
        )
    });

    Router::new()
        .merge(health_routes(services.store))
        .merge(survey_routes(survey_state))
        .nest("/admin", admin_routes(admin_state))
        .layer(trace)
        .layer(cors_layer(&config.cors_origins))
}

/// HTTP server for the survey service
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, services: AppServices) -> Self {
        let router = build_router(services, &config);
        Self { config, router }
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Binds the listener and serves until Ctrl+C or SIGTERM.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(event = Event::ServerStart.as_str(), %addr, "survey service listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = Event::Shutdown.as_str(), "shutdown signal received");
}
