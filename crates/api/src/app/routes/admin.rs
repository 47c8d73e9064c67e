//! Admin routes: order listing, detail, and status updates.
//!
//! The admin gate runs before any order lookup, so a denial carries no
//! information about whether an order exists.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use beltline_core::OrderId;
use beltline_orders::OrderStatus;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", post(update_status))
}

async fn require_admin(
    services: &AppServices,
    session: SessionContext,
) -> Result<(), axum::response::Response> {
    let principal = services
        .sessions
        .get_principal(session.session_id())
        .await
        .map_err(errors::store_error_to_response)?;

    beltline_auth::require_admin(principal.as_ref()).map_err(|_| {
        errors::json_error(StatusCode::FORBIDDEN, "forbidden", "admin access required")
    })
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    if let Err(denied) = require_admin(&services, session).await {
        return denied;
    }

    let orders = match services.orders.list_orders().await {
        Ok(o) => o,
        Err(e) => return errors::store_error_to_response(e),
    };

    let items: Vec<_> = orders.iter().map(dto::order_to_json).collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(denied) = require_admin(&services, session).await {
        return denied;
    }

    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id");
        }
    };

    let order = match services.orders.get_order(id).await {
        Ok(Some(o)) => o,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found");
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    let items = match services.orders.get_order_items(id).await {
        Ok(i) => i,
        Err(e) => return errors::store_error_to_response(e),
    };

    // Join product names for display; vanished products render without one.
    let product_ids: Vec<_> = items.iter().map(|i| i.product_id).collect();
    let products = match services.catalog.get_by_ids(&product_ids).await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let item_json: Vec<_> = items
        .iter()
        .map(|item| {
            let name = products.get(&item.product_id).map(|p| p.name.as_str());
            dto::order_item_to_json(item, name)
        })
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "order": dto::order_to_json(&order),
            "items": item_json,
        })),
    )
        .into_response()
}

pub async fn update_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStatusRequest>,
) -> axum::response::Response {
    if let Err(denied) = require_admin(&services, session).await {
        return denied;
    }

    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id");
        }
    };

    // Unknown status strings never reach the store.
    let status: OrderStatus = match body.status.parse() {
        Ok(s) => s,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_status",
                format!(
                    "status must be one of: {}",
                    OrderStatus::ALL.map(|s| s.as_str()).join(", ")
                ),
            );
        }
    };

    match services.orders.update_status(id, status).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": id, "status": status })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
