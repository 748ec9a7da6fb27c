//! Handlers for payroll period validation and the batch status fixer.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use kencana_core::error::CoreError;
use kencana_core::payroll::{employee_warnings, PayrollValidationReport};
use kencana_core::roles::PERM_PAYROLL_MANAGE;
use kencana_core::types::DbId;
use kencana_db::repositories::{EmployeeRepo, PayrollRepo, RequestRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::attendance::{reconciled_summary, validate_period, PeriodQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/payroll/validate?start=&end=
///
/// Advisory validation sweep over all active employees: reconciled
/// attendance, pending requests, and the threshold checks. Anomalies are
/// warnings only; the report never blocks processing.
pub async fn validate(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(period): Query<PeriodQuery>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PAYROLL_MANAGE)?;
    validate_period(&period)?;

    let employees = EmployeeRepo::list_active(&state.pool).await?;

    let mut warnings = Vec::new();
    for employee in &employees {
        let reconciled = reconciled_summary(&state, employee.id, period.start, period.end).await?;
        let pending =
            RequestRepo::pending_counts(&state.pool, employee.id, period.start, period.end).await?;

        warnings.extend(employee_warnings(
            employee.id,
            &employee.full_name,
            &pending,
            &reconciled,
        ));
    }

    let report = PayrollValidationReport::from_warnings(warnings);

    tracing::info!(
        user_id = auth.user_id,
        start = %period.start,
        end = %period.end,
        employees = employees.len(),
        total_warnings = report.total_warnings,
        "Payroll period validated"
    );

    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/payroll/fix-batch-status
///
/// Sweep all finalized batches and promote stale approved lines to
/// finalized. Idempotent; reruns report zero fixes.
pub async fn fix_batch_status(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PAYROLL_MANAGE)?;

    let report = PayrollRepo::fix_batch_statuses(&state.pool).await?;

    tracing::info!(
        user_id = auth.user_id,
        batches = report.batches.len(),
        total_fixed = report.total_fixed,
        "Payroll batch status fixer ran"
    );

    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/payroll/batches/{id}
pub async fn get_batch(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PAYROLL_MANAGE)?;

    let batch = PayrollRepo::find_batch(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PayrollBatch",
            id,
        }))?;
    let lines = PayrollRepo::list_lines(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "batch": batch, "lines": lines }),
    }))
}
