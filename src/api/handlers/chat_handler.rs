use axum::{
    Json,
    extract::{Extension, Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::chat_dto::*},
    error::AppError,
    security::auth::Claims,
};

pub async fn chat(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    debug!(user_id, "Chat message received");

    let reply = state.chat_service.exchange(user_id, &request.message).await?;

    Ok(Json(ChatReplyResponse { reply }))
}

pub async fn get_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    debug!(user_id, limit = ?params.limit, "History requested");

    let messages = state.chat_service.history(user_id, params.limit).await?;

    let history: Vec<ChatMessageResponse> =
        messages.into_iter().map(ChatMessageResponse::from).collect();
    let total = history.len();

    Ok(Json(ChatHistoryResponse { history, total }))
}

pub async fn clear_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let deleted = state.chat_service.clear_history(user_id).await?;

    Ok(Json(ClearHistoryResponse {
        deleted,
        message: "Chat history cleared!".to_string(),
    }))
}
