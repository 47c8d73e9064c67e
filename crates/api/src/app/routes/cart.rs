use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use beltline_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(view_cart))
        .route("/add", post(add_to_cart))
        .route("/remove", post(remove_from_cart))
}

/// Current cart joined against the catalog for display.
pub async fn view_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let cart = match services.sessions.get_cart(session.session_id()).await {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };

    let resolved = match services.catalog.get_by_ids(&cart.product_ids()).await {
        Ok(r) => r,
        Err(e) => return errors::store_error_to_response(e),
    };

    (StatusCode::OK, Json(dto::cart_to_json(&cart, &resolved))).into_response()
}

pub async fn add_to_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::AddToCartRequest>,
) -> axum::response::Response {
    let mut cart = match services.sessions.get_cart(session.session_id()).await {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };

    // No catalog validation here: unknown products are resolved (and
    // dropped) at checkout time.
    cart.add(
        ProductId::from_raw(body.product_id),
        body.quantity.unwrap_or(1),
    );

    if let Err(e) = services.sessions.set_cart(session.session_id(), cart.clone()).await {
        return errors::store_error_to_response(e);
    }

    let resolved = match services.catalog.get_by_ids(&cart.product_ids()).await {
        Ok(r) => r,
        Err(e) => return errors::store_error_to_response(e),
    };

    (StatusCode::OK, Json(dto::cart_to_json(&cart, &resolved))).into_response()
}

pub async fn remove_from_cart(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::RemoveFromCartRequest>,
) -> axum::response::Response {
    let mut cart = match services.sessions.get_cart(session.session_id()).await {
        Ok(c) => c,
        Err(e) => return errors::store_error_to_response(e),
    };

    cart.remove(ProductId::from_raw(body.product_id));

    if let Err(e) = services.sessions.set_cart(session.session_id(), cart.clone()).await {
        return errors::store_error_to_response(e);
    }

    let resolved = match services.catalog.get_by_ids(&cart.product_ids()).await {
        Ok(r) => r,
        Err(e) => return errors::store_error_to_response(e),
    };

    (StatusCode::OK, Json(dto::cart_to_json(&cart, &resolved))).into_response()
}
