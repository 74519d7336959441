//! Lead audit trail.
//!
//! Rows are only ever inserted. There is deliberately no update or delete.

use sqlx::{Row, SqlitePool};

use crate::error_handling::{AuditWriteFailure, DatabaseError};
use crate::storage::models::{LeadAuditRecord, NewLeadAudit};

/// Inserts one audit row and returns its id.
pub async fn insert_lead_audit(
    pool: &SqlitePool,
    audit: &NewLeadAudit<'_>,
) -> Result<i64, AuditWriteFailure> {
    let created_at_ms = chrono::Utc::now().timestamp_millis();

    let id = sqlx::query(
        "INSERT INTO lead_audit (
            input_payload, lead_payload, response_status, response_payload,
            lead_reference, outcome, created_at_ms
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id",
    )
    .bind(audit.input_payload)
    .bind(audit.lead_payload)
    .bind(audit.response_status.map(i64::from))
    .bind(audit.response_payload)
    .bind(audit.lead_reference)
    .bind(audit.outcome.as_str())
    .bind(created_at_ms)
    .fetch_one(pool)
    .await?
    .try_get::<i64, _>(0)?;

    Ok(id)
}

/// Audit rows for a CMS lead reference, oldest first.
pub async fn find_audits_by_reference(
    pool: &SqlitePool,
    lead_reference: &str,
) -> Result<Vec<LeadAuditRecord>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT id, input_payload, lead_payload, response_status, response_payload,
                lead_reference, outcome, created_at_ms
         FROM lead_audit
         WHERE lead_reference = ?
         ORDER BY id",
    )
    .bind(lead_reference)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<LeadAuditRecord, DatabaseError> {
            let status: Option<i64> = row.try_get("response_status")?;
            Ok(LeadAuditRecord {
                id: row.try_get("id")?,
                input_payload: row.try_get("input_payload")?,
                lead_payload: row.try_get("lead_payload")?,
                response_status: status.and_then(|s| u16::try_from(s).ok()),
                response_payload: row.try_get("response_payload")?,
                lead_reference: row.try_get("lead_reference")?,
                outcome: row.try_get("outcome")?,
                created_at_ms: row.try_get("created_at_ms")?,
            })
        })
        .collect()
}

/// Number of audit rows written so far.
pub async fn count_lead_audits(pool: &SqlitePool) -> Result<i64, DatabaseError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lead_audit")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
