use axum::{
    Json,
    extract::{Extension, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::user_dto::*},
    error::AppError,
    security::auth::Claims,
};

pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    debug!(user_id, "User overview requested");

    let user = state
        .account_service
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User not found: {}", user_id)))?;

    let stats = state.chat_service.stats(user_id).await?;

    Ok(Json(UserOverviewResponse {
        user: user.into(),
        stats: stats.into(),
    }))
}
