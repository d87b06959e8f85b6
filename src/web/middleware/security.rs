//! Security headers middleware.

use axum::{
    body::Body,
    http::{header::HeaderValue, Request},
    middleware::Next,
    response::Response,
};

/// Add security headers to every response.
///
/// - X-Content-Type-Options: nosniff
/// - X-Frame-Options: DENY
/// - Referrer-Policy: same-origin
///
/// HTML responses additionally get `Cache-Control: no-store` so a redirect
/// after posting always shows fresh content.
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;

    let is_html = response
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("text/html"));

    let headers = response.headers_mut();
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("Referrer-Policy", HeaderValue::from_static("same-origin"));

    if is_html && !headers.contains_key("Cache-Control") {
        headers.insert("Cache-Control", HeaderValue::from_static("no-store"));
    }

    response
}
