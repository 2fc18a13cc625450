//! Account session state, owned explicitly rather than kept ambient.
//!
//! The identity provider itself is external; this module only tracks which
//! account is active for the current service session and owns the history
//! cache tied to it. Session start replaces the cache with a fresh store
//! snapshot; sign-out clears both.

pub mod handlers;

use crate::history::HistoryCache;
use crate::models::account::Account;
use crate::models::evaluation::EvaluationRecord;

/// The active account session plus its history cache.
/// Held in `AppState` behind a lock and passed by reference; presentation
/// code reads it, only session handlers and the workflow mutate it.
#[derive(Debug, Default)]
pub struct SessionManager {
    active: Option<Account>,
    history: HistoryCache,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Account> {
        self.active.as_ref()
    }

    pub fn history(&self) -> &HistoryCache {
        &self.history
    }

    /// Activates an account and replaces (not merges) the history cache with
    /// the given store snapshot.
    pub fn start_session(&mut self, account: Account, records: Vec<EvaluationRecord>) {
        self.active = Some(account);
        self.history.replace(records);
    }

    /// Deactivates the account and empties the cache.
    pub fn sign_out(&mut self) {
        self.active = None;
        self.history.clear();
    }

    /// Appends a freshly persisted evaluation for the active account.
    /// No-op when signed out; anonymous scans are not kept in history.
    pub fn record_evaluation(&mut self, record: EvaluationRecord) {
        if self.active.is_some() {
            self.history.append(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::AnalysisResult;
    use chrono::Utc;
    use uuid::Uuid;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            display_name: Some("Jane".to_string()),
            created_at: Utc::now(),
        }
    }

    fn record(label: &str) -> EvaluationRecord {
        EvaluationRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            job_label: label.to_string(),
            result: AnalysisResult {
                match_percentage: 62,
                missing_keywords: vec!["Kubernetes".to_string()],
                strengths: vec!["Go".to_string()],
                summary_critique: "Strong language fit".to_string(),
                recommended_changes: vec![],
                optimized_full_text: "rewritten".to_string(),
            },
        }
    }

    #[test]
    fn test_session_start_replaces_history() {
        let mut manager = SessionManager::new();
        manager.start_session(account(), vec![record("old account scan...")]);
        manager.start_session(account(), vec![record("new account scan...")]);
        assert_eq!(manager.history().len(), 1);
        assert_eq!(manager.history().list()[0].job_label, "new account scan...");
    }

    #[test]
    fn test_sign_out_clears_account_and_history() {
        let mut manager = SessionManager::new();
        manager.start_session(account(), vec![record("scan...")]);
        manager.sign_out();
        assert!(manager.current().is_none());
        assert!(manager.history().is_empty());
    }

    #[test]
    fn test_record_evaluation_requires_active_account() {
        let mut manager = SessionManager::new();
        manager.record_evaluation(record("anonymous scan..."));
        assert!(manager.history().is_empty());

        manager.start_session(account(), vec![]);
        manager.record_evaluation(record("signed-in scan..."));
        assert_eq!(manager.history().len(), 1);
    }
}
