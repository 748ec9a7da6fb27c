//! Payroll batch/line models and the fixer report.

use chrono::NaiveDate;
use kencana_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payroll_batches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayrollBatch {
    pub id: DbId,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub status: String,
    pub finalized_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `payroll_lines` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayrollLine {
    pub id: DbId,
    pub batch_id: DbId,
    pub employee_id: DbId,
    pub base_salary: i64,
    pub overtime_pay: i64,
    pub deductions: i64,
    pub net_pay: i64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Corrections applied to one finalized batch by the status fixer.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFixEntry {
    pub batch_id: DbId,
    pub fixed: u64,
}

/// Full report from one fixer sweep.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFixReport {
    pub batches: Vec<BatchFixEntry>,
    pub total_fixed: u64,
}
