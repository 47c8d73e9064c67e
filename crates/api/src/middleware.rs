use axum::{
    http::{HeaderValue, header::HeaderName},
    middleware::Next,
    response::Response,
};

use beltline_core::SessionId;

use crate::context::SessionContext;

/// Header carrying the visitor's session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Attach a session to every request.
///
/// A valid `x-session-id` header continues that session; anything else
/// mints a fresh one. The id is echoed back on the response so clients
/// can persist it.
pub async fn session_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let session_id = req
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<SessionId>().ok())
        .unwrap_or_else(SessionId::new);

    req.extensions_mut().insert(SessionContext::new(session_id));

    let mut res = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&session_id.to_string()) {
        res.headers_mut()
            .insert(HeaderName::from_static(SESSION_HEADER), value);
    }

    res
}
