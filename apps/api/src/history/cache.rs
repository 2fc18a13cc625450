#![allow(dead_code)]

use uuid::Uuid;

use crate::models::evaluation::EvaluationRecord;

/// Ordered, per-account log of past evaluations, newest first.
///
/// Owned by the workflow layer; the presentation layer only reads snapshots.
/// No deduplication: two identical scans are two entries.
#[derive(Debug, Default)]
pub struct HistoryCache {
    entries: Vec<EvaluationRecord>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record at the head (newest-first).
    pub fn append(&mut self, record: EvaluationRecord) {
        self.entries.insert(0, record);
    }

    /// Current snapshot, newest first.
    pub fn list(&self) -> &[EvaluationRecord] {
        &self.entries
    }

    pub fn get(&self, id: Uuid) -> Option<&EvaluationRecord> {
        self.entries.iter().find(|r| r.id == id)
    }

    /// Empties the cache. Invoked on account sign-out.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the whole cache with a fresh store snapshot (already ordered
    /// newest-first). Invoked on each account session start.
    pub fn replace(&mut self, entries: Vec<EvaluationRecord>) {
        self.entries = entries;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
