pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::account::handlers as account_handlers;
use crate::chat;
use crate::export::handlers as export_handlers;
use crate::state::AppState;
use crate::workflow::handlers as workflow_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Evaluation workflow
        .route(
            "/api/v1/sessions",
            post(workflow_handlers::handle_create_session),
        )
        .route(
            "/api/v1/sessions/:id",
            get(workflow_handlers::handle_get_session),
        )
        .route(
            "/api/v1/sessions/:id/resume/file",
            post(workflow_handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/sessions/:id/resume/paste",
            post(workflow_handlers::handle_paste_resume),
        )
        .route(
            "/api/v1/sessions/:id/job",
            post(workflow_handlers::handle_set_job),
        )
        .route(
            "/api/v1/sessions/:id/submit",
            post(workflow_handlers::handle_submit),
        )
        .route(
            "/api/v1/sessions/:id/retry",
            post(workflow_handlers::handle_retry),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(workflow_handlers::handle_reset),
        )
        .route(
            "/api/v1/sessions/:id/history/:entry_id",
            post(workflow_handlers::handle_select_history),
        )
        // Account session & history
        .route(
            "/api/v1/account/session",
            post(account_handlers::handle_start_session)
                .delete(account_handlers::handle_sign_out),
        )
        .route("/api/v1/history", get(account_handlers::handle_list_history))
        // Assistant chat
        .route("/api/v1/chat", post(chat::handle_chat))
        // PDF export
        .route("/api/v1/export", post(export_handlers::handle_export))
        .with_state(state)
}
