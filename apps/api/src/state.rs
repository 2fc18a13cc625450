use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::account::SessionManager;
use crate::config::Config;
use crate::llm_client::EvaluationBackend;
use crate::workflow::handlers::SessionMap;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The analysis/chat boundary. Production: `GeminiClient`; tests swap in
    /// a stub backend.
    pub llm: Arc<dyn EvaluationBackend>,
    pub config: Config,
    /// Live evaluation workflows, one state machine per session id.
    /// Exclusively owned here; handlers mutate, views are read-only clones.
    pub sessions: SessionMap,
    /// Active account session + its history cache.
    pub account: Arc<RwLock<SessionManager>>,
}
