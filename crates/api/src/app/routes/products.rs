use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use beltline_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let products = match services.catalog.list().await {
        Ok(p) => p,
        Err(e) => return errors::store_error_to_response(e),
    };

    let items: Vec<_> = products.iter().map(dto::product_to_json).collect();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    match services.catalog.get_by_id(id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}
