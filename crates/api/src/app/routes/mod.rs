use axum::{Router, routing::post};

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod session;
pub mod system;

/// Router for all session-scoped storefront endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/login", post(session::login))
        .route("/logout", post(session::logout))
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .nest("/checkout", checkout::router())
        .nest("/admin", admin::router())
}
