//! CLI command implementations

use std::io::Write;
use std::sync::Arc;

use tracing::{info, warn};

use super::args::Command;
use super::errors::CliResult;
use crate::auth::{AdminGate, CaptchaVerifier, FixedCaptchaVerifier, RecaptchaVerifier};
use crate::config::{CaptchaConfig, ServiceConfig};
use crate::http_server::{AppServices, HttpServer};
use crate::observability::Event;
use crate::stats::Aggregator;
use crate::store::SurveyStore;

/// Runs `command` against an already-resolved configuration.
pub async fn run_command(command: Command, mut config: ServiceConfig) -> CliResult<()> {
    if let Some(url) = command.database_override() {
        config.database_url = url.to_string();
    }

    match command {
        Command::Serve { port, .. } => {
            if let Some(port) = port {
                config.http.port = port;
            }
            serve(config).await
        }
        Command::Init { .. } => init(&config).await,
        Command::Stats { .. } => {
            let mut buffer = Vec::new();
            stats(&config, &mut buffer).await?;
            std::io::stdout().write_all(&buffer)?;
            Ok(())
        }
    }
}

fn captcha_verifier(config: &CaptchaConfig) -> Arc<dyn CaptchaVerifier> {
    if config.bypass {
        warn!("CAPTCHA_BYPASS is set, every submission passes the CAPTCHA step");
        return Arc::new(FixedCaptchaVerifier(true));
    }
    if config.secret.is_none() {
        warn!("RECAPTCHA_SECRET_KEY is not set, every submission will fail the CAPTCHA step");
    }
    Arc::new(RecaptchaVerifier::new(
        config.secret.clone(),
        config.verify_url.clone(),
    ))
}

/// Opens the store and serves HTTP until a shutdown signal.
pub async fn serve(config: ServiceConfig) -> CliResult<()> {
    let store = SurveyStore::open(&config.database_url).await?;

    let admin = AdminGate::new(config.admin_key.clone());
    if !admin.is_configured() {
        warn!("ADMIN_KEY is not set, admin routes will reject every request");
    }

    let services = AppServices {
        store: store.clone(),
        captcha: captcha_verifier(&config.captcha),
        admin,
    };

    let server = HttpServer::new(config.http.clone(), services);
    let result = server.start().await;
    store.close().await;
    result?;
    Ok(())
}

/// Ensures the schema exists.
pub async fn init(config: &ServiceConfig) -> CliResult<()> {
    let store = SurveyStore::open(&config.database_url).await?;
    let count = store.count().await?;
    info!(event = Event::SchemaReady.as_str(), records = count, "database initialized");
    store.close().await;
    Ok(())
}

/// Writes the aggregation JSON for the configured database to `out`.
pub async fn stats<W: Write>(config: &ServiceConfig, out: &mut W) -> CliResult<()> {
    let store = SurveyStore::open(&config.database_url).await?;
    let samples = store.samples().await?;
    store.close().await;

    let stats = Aggregator::default().aggregate(&samples);
    serde_json::to_writer_pretty(&mut *out, &stats)?;
    writeln!(out)?;
    Ok(())
}
