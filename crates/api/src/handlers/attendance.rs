//! Handlers for attendance recording and the reconciled summary.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use kencana_core::attendance::{reconcile, ReconciledSummary};
use kencana_core::error::CoreError;
use kencana_core::types::DbId;
use kencana_db::models::attendance::{ClockInRequest, ClockOutRequest, EnhancedAttendanceSummary};
use kencana_db::repositories::{AttendanceRepo, EmployeeRepo, RequestRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Inclusive period query parameters (`?start=...&end=...`).
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// POST /api/v1/attendance/clock-in
///
/// Records the authenticated employee's check-in, deriving lateness against
/// the scheduled shift start. One row per employee per day; re-clocking
/// updates in place.
pub async fn clock_in(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ClockInRequest>,
) -> AppResult<impl IntoResponse> {
    let record =
        AttendanceRepo::clock_in(&state.pool, auth.user_id, input.work_date, input.time).await?;

    tracing::info!(
        user_id = auth.user_id,
        work_date = %input.work_date,
        status = %record.status,
        minutes_late = record.minutes_late,
        "Clock-in recorded"
    );

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/attendance/clock-out
pub async fn clock_out(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ClockOutRequest>,
) -> AppResult<impl IntoResponse> {
    let record =
        AttendanceRepo::clock_out(&state.pool, auth.user_id, input.work_date, input.time).await?;

    tracing::info!(
        user_id = auth.user_id,
        work_date = %input.work_date,
        "Clock-out recorded"
    );

    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/employees/{id}/attendance-summary?start=&end=
///
/// The reconciled summary: base aggregates with approved lateness excuses
/// subtracted from `total_minutes_late`, per-date detail preserved.
pub async fn attendance_summary(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
    Query(period): Query<PeriodQuery>,
) -> AppResult<impl IntoResponse> {
    validate_period(&period)?;
    ensure_employee_exists(&state, employee_id).await?;

    let summary = build_summary(&state, employee_id, period.start, period.end).await?;
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/employees/{id}/pending-requests?start=&end=
pub async fn pending_requests(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(employee_id): Path<DbId>,
    Query(period): Query<PeriodQuery>,
) -> AppResult<impl IntoResponse> {
    validate_period(&period)?;
    ensure_employee_exists(&state, employee_id).await?;

    let counts =
        RequestRepo::pending_counts(&state.pool, employee_id, period.start, period.end).await?;
    Ok(Json(DataResponse { data: counts }))
}

/// Reconcile one employee's base aggregates against their approved lateness
/// excuses. Shared with the payroll validation handler.
pub(crate) async fn reconciled_summary(
    state: &AppState,
    employee_id: DbId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ReconciledSummary, AppError> {
    let base = AttendanceRepo::base_summary(&state.pool, employee_id, start, end).await?;
    let excused: std::collections::HashSet<NaiveDate> =
        RequestRepo::approved_lateness_excuse_dates(&state.pool, employee_id, start, end)
            .await?
            .into_iter()
            .collect();
    Ok(reconcile(&base, &excused))
}

async fn build_summary(
    state: &AppState,
    employee_id: DbId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<EnhancedAttendanceSummary, AppError> {
    let reconciled = reconciled_summary(state, employee_id, start, end).await?;

    Ok(EnhancedAttendanceSummary {
        employee_id,
        start_date: start,
        end_date: end,
        total_minutes_late: reconciled.total_minutes_late,
        absence_days: reconciled.absence_days,
        overtime_hours: reconciled.overtime_hours,
        lateness_detail: reconciled.lateness_detail,
    })
}

pub(crate) fn validate_period(period: &PeriodQuery) -> Result<(), AppError> {
    if period.start > period.end {
        return Err(AppError::Core(CoreError::Validation(
            "start must not be after end".to_string(),
        )));
    }
    Ok(())
}

async fn ensure_employee_exists(state: &AppState, employee_id: DbId) -> Result<(), AppError> {
    EmployeeRepo::find_by_id(&state.pool, employee_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id: employee_id,
        }))?;
    Ok(())
}
