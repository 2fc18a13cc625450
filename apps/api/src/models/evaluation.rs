use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::analysis::AnalysisResult;

/// A persisted evaluation as stored in the `evaluations` table.
/// `match_percentage` and `summary_critique` are denormalized out of the
/// full result so history listings never need to unpack the JSON column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EvaluationRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub job_description: String,
    pub match_percentage: i32,
    pub summary_critique: String,
    pub full_result: Json<AnalysisResult>,
    pub created_at: DateTime<Utc>,
}

/// A history entry as served to the presentation layer: the row with the
/// job description collapsed into a short display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub job_label: String,
    pub result: AnalysisResult,
}

impl From<EvaluationRow> for EvaluationRecord {
    fn from(row: EvaluationRow) -> Self {
        EvaluationRecord {
            id: row.id,
            created_at: row.created_at,
            job_label: derive_job_label(&row.job_description),
            result: row.full_result.0,
        }
    }
}

/// Collapses a job description into the short label shown in history
/// listings: the first 40 characters with a trailing ellipsis.
pub fn derive_job_label(job_description: &str) -> String {
    let truncated: String = job_description.chars().take(40).collect();
    format!("{truncated}...")
}
