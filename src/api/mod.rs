//! API 模块
//!
//! 提供 REST API 支持。

#[cfg(test)]
mod api_tests;
pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::error::AppError;
use crate::security::middleware::{
    auth_middleware, rate_limit_middleware, security_headers_middleware,
};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(app_state: AppState) -> Router {
    let public = routes::auth_routes::create_auth_router();

    // Protected routes require a valid session token.
    let authenticator = app_state.authenticator.clone();
    let protected = Router::new()
        .merge(routes::chat_routes::create_chat_router())
        .merge(routes::tool_routes::create_tool_router())
        .merge(routes::user_routes::create_user_router())
        .layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let auth = authenticator.clone();
                async move { auth_middleware(req, next, auth).await }
            },
        ));

    let rate_limiter = app_state.rate_limiter.clone();

    Router::new()
        .nest("/api/v1", public.merge(protected))
        .layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let limiter = rate_limiter.clone();
                async move { rate_limit_middleware(req, next, limiter).await }
            },
        ))
        // Add security headers middleware to all routes
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

pub async fn initialize_api(app_state: AppState) -> Result<Router, AppError> {
    tracing::info!("Initializing API router...");
    Ok(create_router(app_state))
}
