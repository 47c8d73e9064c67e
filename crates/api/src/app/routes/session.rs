use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use beltline_auth::{Principal, Role};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

/// Authenticate the session against the configured owner account.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    if !services.admin.verify(&body.username, &body.password) {
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid credentials",
        );
    }

    let principal = Principal::new(body.username, Role::Admin);
    if let Err(e) = services
        .sessions
        .set_principal(session.session_id(), Some(principal.clone()))
        .await
    {
        return errors::store_error_to_response(e);
    }

    tracing::info!(username = %principal.username, "admin login");
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "username": principal.username,
            "role": principal.role,
        })),
    )
        .into_response()
}

pub async fn logout(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    if let Err(e) = services
        .sessions
        .set_principal(session.session_id(), None)
        .await
    {
        return errors::store_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}
