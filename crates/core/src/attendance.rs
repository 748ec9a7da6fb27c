//! Attendance reconciliation arithmetic.
//!
//! Cross-references raw per-date lateness against approved lateness-excuse
//! requests so employees are not penalized twice. Everything here is a pure
//! read-side computation: same inputs, same output, no mutation.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Attendance status constants
// ---------------------------------------------------------------------------

/// Checked in on or before the scheduled shift start.
pub const ATTENDANCE_PRESENT: &str = "present";
/// Checked in after the scheduled shift start.
pub const ATTENDANCE_LATE: &str = "late";
/// No check-in recorded for a scheduled day.
pub const ATTENDANCE_ABSENT: &str = "absent";
/// Covered by an approved leave/absence request.
pub const ATTENDANCE_PERMITTED: &str = "permitted";

// ---------------------------------------------------------------------------
// Exception request types and statuses
// ---------------------------------------------------------------------------

/// Excuses a late check-in on one date; approved excuses suppress the
/// lateness minutes for that date.
pub const REQUEST_LATENESS_EXCUSE: &str = "lateness_excuse";
/// Excuses leaving before the scheduled shift end on one date.
pub const REQUEST_EARLY_LEAVE_EXCUSE: &str = "early_leave_excuse";
/// Excuses a full-day absence on one date.
pub const REQUEST_ABSENCE_EXCUSE: &str = "absence_excuse";
/// Leave over a date range.
pub const REQUEST_LEAVE: &str = "leave";
/// Overtime worked on one date, with hours.
pub const REQUEST_OVERTIME: &str = "overtime";

/// All valid request types.
pub const VALID_REQUEST_TYPES: &[&str] = &[
    REQUEST_LATENESS_EXCUSE,
    REQUEST_EARLY_LEAVE_EXCUSE,
    REQUEST_ABSENCE_EXCUSE,
    REQUEST_LEAVE,
    REQUEST_OVERTIME,
];

/// Awaiting approver decision.
pub const REQUEST_PENDING: &str = "pending";
/// Approved by HR/director.
pub const REQUEST_APPROVED: &str = "approved";
/// Rejected by HR/director.
pub const REQUEST_REJECTED: &str = "rejected";

/// Validate a request type string.
pub fn validate_request_type(request_type: &str) -> Result<(), CoreError> {
    if VALID_REQUEST_TYPES.contains(&request_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown request type: '{request_type}'. Valid types: {}",
            VALID_REQUEST_TYPES.join(", ")
        )))
    }
}

/// One day of lateness detail, annotated with whether an approved excuse
/// covers it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatenessEntry {
    pub date: NaiveDate,
    pub minutes_late: i32,
    pub excused: bool,
}

/// Base attendance aggregate for one employee over a period, before excuse
/// reconciliation. Produced by the attendance aggregation queries.
#[derive(Debug, Clone)]
pub struct BaseSummary {
    /// Per-date lateness minutes, one entry per late day.
    pub late_days: Vec<(NaiveDate, i32)>,
    pub absence_days: i64,
    pub overtime_hours: f64,
}

/// Reconciled attendance summary: `total_minutes_late` counts unexcused
/// entries only; the per-date detail keeps excused entries for audit display.
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledSummary {
    pub total_minutes_late: i64,
    pub absence_days: i64,
    pub overtime_hours: f64,
    pub lateness_detail: Vec<LatenessEntry>,
}

/// Reconcile a base summary against the set of dates holding an approved
/// lateness-excuse request.
pub fn reconcile(base: &BaseSummary, excused_dates: &HashSet<NaiveDate>) -> ReconciledSummary {
    let mut total: i64 = 0;
    let mut detail = Vec::with_capacity(base.late_days.len());
    for &(date, minutes) in &base.late_days {
        let excused = excused_dates.contains(&date);
        if !excused {
            total += i64::from(minutes);
        }
        detail.push(LatenessEntry {
            date,
            minutes_late: minutes,
            excused,
        });
    }
    ReconciledSummary {
        total_minutes_late: total,
        absence_days: base.absence_days,
        overtime_hours: base.overtime_hours,
        lateness_detail: detail,
    }
}

/// Minutes late for a check-in against the scheduled shift start, clamped at
/// zero for on-time arrivals.
pub fn minutes_late(scheduled_start: NaiveTime, check_in: NaiveTime) -> i32 {
    let delta = (check_in - scheduled_start).num_minutes();
    delta.max(0) as i32
}

/// Derive the day's attendance status from the computed lateness.
pub fn status_for_check_in(minutes_late: i32) -> &'static str {
    if minutes_late > 0 {
        ATTENDANCE_LATE
    } else {
        ATTENDANCE_PRESENT
    }
}

/// Inclusive date-range overlap: `[a_start, a_end]` and `[b_start, b_end]`
/// overlap when neither lies strictly before the other. Covers spans that
/// fully contain the other range.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}
