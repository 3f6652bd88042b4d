use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::auth_dto::*},
    error::AppError,
};

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Signup request for username: {}", request.username);

    let session = state
        .account_service
        .signup(&request.username, &request.email, &request.password)
        .await?;

    let response = AuthResponse {
        token: session.token,
        user: session.user.into(),
        message: "Account created successfully!".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Login request for username: {}", request.username);

    let session = state
        .account_service
        .login(&request.username, &request.password)
        .await?;

    let response = AuthResponse {
        token: session.token,
        user: session.user.into(),
        message: "Login successful!".to_string(),
    };

    Ok(Json(response))
}
