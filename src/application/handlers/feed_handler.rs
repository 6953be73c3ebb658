use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::application::handlers::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::entities::message::{MessageCategory, MessageType, ProcessedMessage};

/// Query parameters for message endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesQuery {
    /// Maximum messages to return (default 50, max 100)
    pub limit: Option<usize>,
}

impl MessagesQuery {
    fn limit(&self) -> usize {
        self.limit.unwrap_or(50).clamp(1, 100)
    }
}

/// API response for message queries
#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<ProcessedMessage>,
    pub count: usize,
}

/// Most recent channel messages, newest first
pub async fn get_recent_messages(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MessagesQuery>,
) -> Json<MessagesResponse> {
    let messages = state.feed.recent_messages(params.limit()).await;
    let count = messages.len();
    Json(MessagesResponse { messages, count })
}

/// Messages filtered by type (signal, analysis, market_update)
pub async fn get_messages_by_type(
    State(state): State<Arc<AppState>>,
    Path(message_type): Path<String>,
    Query(params): Query<MessagesQuery>,
) -> Result<Json<MessagesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let message_type = MessageType::from_str(&message_type)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })))?;

    let messages = state
        .feed
        .messages_by_type(message_type, params.limit())
        .await;
    let count = messages.len();
    Ok(Json(MessagesResponse { messages, count }))
}

/// Messages filtered by category (forex, crypto, commodities)
pub async fn get_messages_by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(params): Query<MessagesQuery>,
) -> Result<Json<MessagesResponse>, (StatusCode, Json<ErrorResponse>)> {
    let category = MessageCategory::from_str(&category)
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })))?;

    let messages = state
        .feed
        .messages_by_category(category, params.limit())
        .await;
    let count = messages.len();
    Ok(Json(MessagesResponse { messages, count }))
}

/// Drop the cached batch so the next query refetches upstream
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.feed.clear_cache().await;
    Json(serde_json::json!({ "cleared": true }))
}
