//! # HTTP Server Module
//!
//! Axum server for the survey service.
//!
//! # Endpoints
//!
//! - `POST /submit` - Public survey submission (CAPTCHA + validation)
//! - `GET /data` - Cohort statistics
//! - `GET /admin/records` - List all records (admin key required)
//! - `POST /admin/delete` - Bulk delete by id (admin key required)
//! - `GET /health`, `GET /ready` - Liveness and store reachability

pub mod admin_routes;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod survey_routes;

pub use errors::ApiError;
pub use server::{build_router, AppServices, HttpServer};
