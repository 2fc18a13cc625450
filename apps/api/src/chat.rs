//! Assistant chat endpoint. Service failures degrade into a fixed apology
//! line in the transcript; the chat never surfaces an error response.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{ChatTurn, EvaluationBackend};
use crate::state::AppState;

/// Shown in place of a reply when the chat service is unreachable.
pub const CHAT_FALLBACK_REPLY: &str =
    "I'm having a bit of trouble connecting right now. Could you try asking that again?";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let response = assistant_reply(state.llm.as_ref(), &req.message, &req.history).await;
    Json(ChatResponse { response })
}

/// One assistant turn. On failure the transcript gets the apology string
/// instead of an error.
pub(crate) async fn assistant_reply(
    backend: &dyn EvaluationBackend,
    message: &str,
    history: &[ChatTurn],
) -> String {
    match backend.chat(message, history).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("chat service failure: {e}");
            CHAT_FALLBACK_REPLY.to_string()
        }
    }
}
