use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use beltline_checkout::CheckoutError;
use beltline_infra::{CheckoutRunError, StoreError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "store backend failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
        StoreError::Serialization(msg) => {
            tracing::error!(error = %msg, "store serialization failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn checkout_error_to_response(err: CheckoutRunError) -> axum::response::Response {
    match err {
        CheckoutRunError::Checkout(CheckoutError::EmptyCart) => {
            json_error(StatusCode::BAD_REQUEST, "empty_cart", "cart is empty")
        }
        CheckoutRunError::Checkout(CheckoutError::EmptyAfterValidation { dropped }) => json_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "empty_after_validation",
            format!("all {dropped} cart line(s) reference unknown products"),
        ),
        CheckoutRunError::Store(e) => store_error_to_response(e),
    }
}
