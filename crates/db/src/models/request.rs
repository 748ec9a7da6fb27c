//! Exception request model (lateness/early-leave/absence excuses, leave,
//! overtime) and DTOs.

use chrono::NaiveDate;
use kencana_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `exception_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExceptionRequest {
    pub id: DbId,
    pub employee_id: DbId,
    pub request_type: String,
    pub request_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub overtime_hours: Option<f64>,
    pub reason: String,
    pub status: String,
    pub approved_by: Option<DbId>,
    pub requested_at: Timestamp,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for submitting an exception request. Single-date types use
/// `request_date`; leave uses `start_date`/`end_date`; overtime additionally
/// carries `overtime_hours`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExceptionRequest {
    pub request_type: String,
    pub request_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub overtime_hours: Option<f64>,
    pub reason: String,
}
