//! Axum route handlers for account sessions and history listings.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::store;
use crate::models::account::Account;
use crate::models::evaluation::EvaluationRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub account_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub account: Account,
    pub history: Vec<EvaluationRecord>,
}

/// POST /api/v1/account/session
///
/// Starts an account session: loads the account record and replaces the
/// history cache with a fresh snapshot from the store.
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let account: Account = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
        .bind(req.account_id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {} not found", req.account_id)))?;

    let records: Vec<EvaluationRecord> = store::list_evaluations(&state.db, account.id)
        .await
        .map_err(AppError::Internal)?
        .into_iter()
        .map(EvaluationRecord::from)
        .collect();

    let mut manager = state.account.write().await;
    manager.start_session(account.clone(), records.clone());

    Ok(Json(SessionResponse {
        account,
        history: records,
    }))
}

/// DELETE /api/v1/account/session
///
/// Signs out: clears the active account and empties the history cache.
pub async fn handle_sign_out(State(state): State<AppState>) -> StatusCode {
    state.account.write().await.sign_out();
    StatusCode::NO_CONTENT
}

/// GET /api/v1/history
///
/// Newest-first history snapshot for the active account. Signed-out callers
/// get an empty list, matching the signed-out scanner view.
pub async fn handle_list_history(
    State(state): State<AppState>,
) -> Json<Vec<EvaluationRecord>> {
    let manager = state.account.read().await;
    Json(manager.history().list().to_vec())
}
