//! Repository for payroll batches and lines, including the idempotent
//! batch status fixer.

use sqlx::PgPool;

use kencana_core::payroll::{BATCH_FINALIZED, LINE_APPROVED, LINE_FINALIZED};
use kencana_core::types::DbId;

use crate::models::payroll::{BatchFixEntry, BatchFixReport, PayrollBatch, PayrollLine};

/// Column list for payroll_batches queries.
const BATCH_COLUMNS: &str =
    "id, period_start, period_end, status, finalized_at, created_at, updated_at";

/// Column list for payroll_lines queries.
const LINE_COLUMNS: &str = "id, batch_id, employee_id, base_salary, overtime_pay, \
    deductions, net_pay, status, created_at, updated_at";

/// Provides batch/line reads and the corrective status sweep.
pub struct PayrollRepo;

impl PayrollRepo {
    /// Find a batch by its ID.
    pub async fn find_batch(pool: &PgPool, id: DbId) -> Result<Option<PayrollBatch>, sqlx::Error> {
        let query = format!("SELECT {BATCH_COLUMNS} FROM payroll_batches WHERE id = $1");
        sqlx::query_as::<_, PayrollBatch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the lines of a batch.
    pub async fn list_lines(pool: &PgPool, batch_id: DbId) -> Result<Vec<PayrollLine>, sqlx::Error> {
        let query = format!(
            "SELECT {LINE_COLUMNS} FROM payroll_lines
             WHERE batch_id = $1
             ORDER BY employee_id ASC"
        );
        sqlx::query_as::<_, PayrollLine>(&query)
            .bind(batch_id)
            .fetch_all(pool)
            .await
    }

    /// Corrective sweep: for every finalized batch, force lines still
    /// `approved` to `finalized` and report the per-batch counts.
    ///
    /// Each batch is processed in its own transaction with the batch row
    /// locked `FOR UPDATE`, so two concurrent sweeps serialize per batch and
    /// the later one finds nothing left to fix. Running the sweep on
    /// consistent data is a no-op.
    pub async fn fix_batch_statuses(pool: &PgPool) -> Result<BatchFixReport, sqlx::Error> {
        let batch_ids: Vec<DbId> = sqlx::query_scalar(
            "SELECT id FROM payroll_batches WHERE status = $1 ORDER BY id ASC",
        )
        .bind(BATCH_FINALIZED)
        .fetch_all(pool)
        .await?;

        let mut batches = Vec::with_capacity(batch_ids.len());
        let mut total_fixed: u64 = 0;

        for batch_id in batch_ids {
            let mut tx = pool.begin().await?;

            // Re-check the status under the lock; the batch may have been
            // touched between the listing and this transaction.
            let locked: Option<DbId> = sqlx::query_scalar(
                "SELECT id FROM payroll_batches
                 WHERE id = $1 AND status = $2
                 FOR UPDATE",
            )
            .bind(batch_id)
            .bind(BATCH_FINALIZED)
            .fetch_optional(&mut *tx)
            .await?;

            if locked.is_none() {
                continue;
            }

            let fixed = sqlx::query(
                "UPDATE payroll_lines
                 SET status = $2, updated_at = NOW()
                 WHERE batch_id = $1 AND status = $3",
            )
            .bind(batch_id)
            .bind(LINE_FINALIZED)
            .bind(LINE_APPROVED)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            tx.commit().await?;

            if fixed > 0 {
                tracing::info!(batch_id, fixed, "Repaired stale payroll line statuses");
            }
            total_fixed += fixed;
            batches.push(BatchFixEntry { batch_id, fixed });
        }

        Ok(BatchFixReport {
            batches,
            total_fixed,
        })
    }
}
