use std::sync::Arc;

use agriscout_llm::{ChatReply, ChatRequest};
use axum::{extract::State, Json};

use crate::dto::AssistantChatRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// Relay a question to the assistant; never fails once the query is present
pub async fn assistant_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssistantChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::bad_request("Query is required"));
    }

    let mut chat = ChatRequest::new(query);
    if let Some(session_id) = request.session_id {
        chat = chat.with_session(session_id);
    }
    if let Some(page) = request.page {
        chat = chat.with_page(page);
    }

    let reply = state.relay.ask(&chat).await;
    tracing::info!(source = ?reply.source, "Assistant replied");
    Ok(Json(reply))
}
