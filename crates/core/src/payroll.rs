//! Payroll batch/line status constants and the advisory period-validation
//! report.
//!
//! The validation report is deliberately non-blocking: anomalies (pending
//! requests, excess overtime, unexcused lateness, absences) are surfaced as
//! warnings for a human reviewer, never as errors. `can_process` is derived
//! from the error list, which this service leaves empty.

use serde::Serialize;

use crate::attendance::ReconciledSummary;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Batch status constants
// ---------------------------------------------------------------------------

/// Batch assembled, lines still editable.
pub const BATCH_DRAFT: &str = "draft";
/// Batch reviewed and approved for payment.
pub const BATCH_APPROVED: &str = "approved";
/// Batch paid out and closed.
pub const BATCH_FINALIZED: &str = "finalized";

/// All valid batch statuses.
pub const VALID_BATCH_STATUSES: &[&str] = &[BATCH_DRAFT, BATCH_APPROVED, BATCH_FINALIZED];

// ---------------------------------------------------------------------------
// Employee line status constants
// ---------------------------------------------------------------------------

/// Line computed, awaiting review.
pub const LINE_DRAFT: &str = "draft";
/// Line approved within its batch.
pub const LINE_APPROVED: &str = "approved";
/// Line paid out with its finalized batch.
pub const LINE_FINALIZED: &str = "finalized";

/// All valid line statuses.
pub const VALID_LINE_STATUSES: &[&str] = &[LINE_DRAFT, LINE_APPROVED, LINE_FINALIZED];

// ---------------------------------------------------------------------------
// Advisory thresholds (per payroll period)
// ---------------------------------------------------------------------------

/// Overtime hours above this trigger a warning.
pub const MAX_OVERTIME_HOURS: f64 = 40.0;
/// Unexcused lateness minutes above this trigger a warning.
pub const MAX_UNEXCUSED_LATE_MINUTES: i64 = 120;
/// Absence days above this trigger a warning.
pub const MAX_ABSENCE_DAYS: i64 = 3;

/// Pending exception-request counts for one employee over a period.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PendingRequests {
    pub permission: i64,
    pub overtime: i64,
    pub leave: i64,
    pub total: i64,
    pub has_pending: bool,
}

impl PendingRequests {
    pub fn new(permission: i64, overtime: i64, leave: i64) -> Self {
        let total = permission + overtime + leave;
        Self {
            permission,
            overtime,
            leave,
            total,
            has_pending: total > 0,
        }
    }
}

/// One advisory warning, tied to the employee it concerns.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollWarning {
    pub employee_id: DbId,
    pub employee_name: String,
    pub message: String,
}

/// Result of validating a payroll period across all active employees.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollValidationReport {
    pub can_process: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<PayrollWarning>,
    pub total_warnings: usize,
}

impl PayrollValidationReport {
    /// Assemble the report. Errors are always empty in the current design
    /// (advisory-only governance), so `can_process` is always true.
    pub fn from_warnings(warnings: Vec<PayrollWarning>) -> Self {
        let errors: Vec<String> = Vec::new();
        Self {
            can_process: errors.is_empty(),
            errors,
            total_warnings: warnings.len(),
            warnings,
        }
    }
}

/// Collect the advisory warnings for one employee: pending requests in the
/// period, overtime above [`MAX_OVERTIME_HOURS`], unexcused lateness above
/// [`MAX_UNEXCUSED_LATE_MINUTES`], absences above [`MAX_ABSENCE_DAYS`].
pub fn employee_warnings(
    employee_id: DbId,
    employee_name: &str,
    pending: &PendingRequests,
    summary: &ReconciledSummary,
) -> Vec<PayrollWarning> {
    let mut warnings = Vec::new();
    let mut push = |message: String| {
        warnings.push(PayrollWarning {
            employee_id,
            employee_name: employee_name.to_string(),
            message,
        });
    };

    if pending.has_pending {
        push(format!(
            "{} unresolved request(s) in the period ({} permission, {} overtime, {} leave)",
            pending.total, pending.permission, pending.overtime, pending.leave
        ));
    }
    if summary.overtime_hours > MAX_OVERTIME_HOURS {
        push(format!(
            "overtime of {:.1} hours exceeds {MAX_OVERTIME_HOURS} hours",
            summary.overtime_hours
        ));
    }
    if summary.total_minutes_late > MAX_UNEXCUSED_LATE_MINUTES {
        push(format!(
            "unexcused lateness of {} minutes exceeds {MAX_UNEXCUSED_LATE_MINUTES} minutes",
            summary.total_minutes_late
        ));
    }
    if summary.absence_days > MAX_ABSENCE_DAYS {
        push(format!(
            "{} absence day(s) exceed {MAX_ABSENCE_DAYS} days",
            summary.absence_days
        ));
    }
    warnings
}
