//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and checkout runner wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use beltline_infra::StoreError;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: AppConfig) -> Result<Router, StoreError> {
    let services = Arc::new(services::build_services(&config).await?);

    // Everything except /health runs with a session attached.
    let storefront = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn(middleware::session_middleware));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(storefront)
        .layer(ServiceBuilder::new()))
}
