//! Postgres store for evaluation history: the persistence collaborator
//! behind the in-memory cache.

use anyhow::Result;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::analysis::{AnalysisResult, EvaluationRequest};
use crate::models::evaluation::EvaluationRow;

/// Fetches every evaluation for an account, newest first.
pub async fn list_evaluations(pool: &PgPool, account_id: Uuid) -> Result<Vec<EvaluationRow>> {
    let rows = sqlx::query_as::<_, EvaluationRow>(
        "SELECT * FROM evaluations WHERE account_id = $1 ORDER BY created_at DESC",
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Persists one completed evaluation. Rows are append-only: created here,
/// never updated.
pub async fn save_evaluation(
    pool: &PgPool,
    account_id: Uuid,
    request: &EvaluationRequest,
    result: &AnalysisResult,
) -> Result<EvaluationRow> {
    let row = sqlx::query_as::<_, EvaluationRow>(
        r#"
        INSERT INTO evaluations
            (account_id, job_description, match_percentage, summary_critique, full_result)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(account_id)
    .bind(&request.job_description)
    .bind(result.match_percentage as i32)
    .bind(&result.summary_critique)
    .bind(Json(result.clone()))
    .fetch_one(pool)
    .await?;
    Ok(row)
}
