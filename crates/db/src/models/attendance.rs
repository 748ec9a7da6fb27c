//! Attendance record model and summary response types.

use chrono::{NaiveDate, NaiveTime};
use kencana_core::attendance::LatenessEntry;
use kencana_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub employee_id: DbId,
    pub work_date: NaiveDate,
    pub scheduled_start: NaiveTime,
    pub scheduled_end: NaiveTime,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    pub status: String,
    pub minutes_late: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for clock-in.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockInRequest {
    pub work_date: NaiveDate,
    pub time: NaiveTime,
}

/// Request body for clock-out.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockOutRequest {
    pub work_date: NaiveDate,
    pub time: NaiveTime,
}

/// Enhanced attendance summary for one employee over a period:
/// `total_minutes_late` counts unexcused lateness only, with the annotated
/// per-date detail preserved for audit display.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedAttendanceSummary {
    pub employee_id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_minutes_late: i64,
    pub absence_days: i64,
    pub overtime_hours: f64,
    pub lateness_detail: Vec<LatenessEntry>,
}
