use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::post,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new().route("/", post(checkout))
}

/// Convert the session's cart into a persisted order.
///
/// On success the cart is empty and the receipt lists any dropped lines;
/// on failure the cart is untouched and retryable.
pub async fn checkout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    match services.checkout.checkout(session.session_id()).await {
        Ok(receipt) => {
            (StatusCode::CREATED, Json(dto::receipt_to_json(&receipt))).into_response()
        }
        Err(e) => errors::checkout_error_to_response(e),
    }
}
