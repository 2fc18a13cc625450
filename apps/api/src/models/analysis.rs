//! Typed records for one evaluation: the submitted pair and the structured
//! critique returned by the analysis service.
//!
//! External JSON is never trusted as-is: deserialization is strict on field
//! presence and types, and `AnalysisResult::validate` enforces the value
//! invariants (percentage range, non-empty required strings) before a result
//! is allowed into the workflow.

use serde::{Deserialize, Serialize};

/// The immutable (job description, resume text) pair sent to the analysis
/// service. Both fields are non-empty after trimming by the time this is
/// constructed; the workflow controller rejects blank submissions first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub job_description: String,
    pub resume_text: String,
}

/// A single suggested rewrite: the original resume text and a higher-impact
/// alternative, with the section it belongs to and the reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedChange {
    pub section: String,
    pub original: String,
    pub suggested: String,
    pub reason: String,
}

/// The full structured critique. Immutable once constructed; consumed
/// read-only by the presentation layer, history cache, and PDF export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_percentage: u8,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub summary_critique: String,
    pub recommended_changes: Vec<RecommendedChange>,
    pub optimized_full_text: String,
}

impl AnalysisResult {
    /// Checks the value invariants that serde typing alone cannot express.
    ///
    /// Returns the first violation found. A result that fails here must be
    /// rejected as an invalid response shape, never partially accepted.
    pub fn validate(&self) -> Result<(), String> {
        if self.match_percentage > 100 {
            return Err(format!(
                "match_percentage {} is outside 0..=100",
                self.match_percentage
            ));
        }
        if self.summary_critique.trim().is_empty() {
            return Err("summary_critique is empty".to_string());
        }
        if self.optimized_full_text.trim().is_empty() {
            return Err("optimized_full_text is empty".to_string());
        }
        for (i, change) in self.recommended_changes.iter().enumerate() {
            for (field, value) in [
                ("section", &change.section),
                ("original", &change.original),
                ("suggested", &change.suggested),
                ("reason", &change.reason),
            ] {
                if value.trim().is_empty() {
                    return Err(format!("recommended_changes[{i}].{field} is empty"));
                }
            }
        }
        Ok(())
    }
}
