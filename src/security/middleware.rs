//! Security Middleware Module
//!
//! Axum middleware for session authentication, rate limiting, and
//! security response headers.

use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::result::Result as StdResult;
use std::sync::Arc;

use crate::security::auth::{Claims, JwtAuth, bearer_token};
use crate::security::rate_limit::{RateLimitResult, RateLimiter};

/// Authentication middleware
///
/// Validates the `Authorization: Bearer <token>` header and injects
/// the decoded [`Claims`] into request extensions for handlers.
pub async fn auth_middleware(
    req: Request<Body>,
    next: Next,
    authenticator: Arc<JwtAuth>,
) -> StdResult<Response, StatusCode> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| bearer_token(Some(h)))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = authenticator
        .validate_token(token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let mut req = req;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    req: Request<Body>,
    next: Next,
    rate_limiter: Arc<RateLimiter>,
) -> StdResult<Response, StatusCode> {
    let client_id = extract_client_id(&req);

    match rate_limiter.check_rate_limit(&client_id).await {
        RateLimitResult::Allowed { .. } => Ok(next.run(req).await),
        RateLimitResult::Limited { retry_after } => {
            let mut response = Response::new(Body::from("Too Many Requests"));
            *response.status_mut() = StatusCode::TOO_MANY_REQUESTS;
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            Ok(response)
        }
    }
}

/// Identify the client for rate limiting: authenticated user first,
/// then proxy-reported IP, then a shared bucket.
fn extract_client_id(req: &Request<Body>) -> String {
    if let Some(claims) = req.extensions().get::<Claims>() {
        return format!("user:{}", claims.sub);
    }

    for header_name in ["X-Forwarded-For", "X-Real-IP"] {
        if let Some(value) = req.headers().get(header_name) {
            if let Ok(ip) = value.to_str() {
                return format!("ip:{}", ip.split(',').next().unwrap_or(ip).trim());
            }
        }
    }

    "anonymous".to_string()
}

/// Security headers middleware
pub async fn security_headers_middleware(
    req: Request<Body>,
    next: Next,
) -> StdResult<Response, StatusCode> {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers.insert("X-Content-Type-Options", "nosniff".parse().unwrap());
    headers.insert("X-Frame-Options", "DENY".parse().unwrap());
    headers.insert(
        "Strict-Transport-Security",
        "max-age=31536000; includeSubDomains".parse().unwrap(),
    );
    headers.insert(
        "Referrer-Policy",
        "strict-origin-when-cross-origin".parse().unwrap(),
    );

    Ok(response)
}
