pub mod attendance;
pub mod change_request;
pub mod health;
pub mod payroll;
pub mod proposal;
pub mod requests;
pub mod roles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /proposals                                   list, submit
/// /proposals/{id}                              get
/// /proposals/{id}/propose-price                PPIC price proposal
/// /proposals/{id}/approve-deadline             PPIC deadline approval
/// /proposals/{id}/reject-deadline              PPIC deadline rejection
/// /proposals/{id}/modify-deadline              PPIC counter-proposal
/// /proposals/{id}/approve-price                Finance approval
/// /proposals/{id}/reject-price                 Finance rejection
/// /proposals/{id}/approve-appeal               Finance appeal approval
/// /proposals/{id}/confirm                      Marketing confirmation
/// /proposals/{id}/reject                       Marketing decline
/// /proposals/{id}/cancel                       Marketing withdrawal
/// /proposals/{id}/appeal-price                 Marketing price appeal
/// /proposals/{id}/appeal-deadline              Marketing deadline appeal
///
/// /attendance/clock-in                         record check-in (POST)
/// /attendance/clock-out                        record check-out (POST)
/// /employees/{id}/attendance-summary           reconciled summary (GET)
/// /employees/{id}/pending-requests             pending counts (GET)
///
/// /requests                                    list, submit
/// /requests/{id}/approve                       approve (POST)
/// /requests/{id}/reject                        reject (POST)
///
/// /payroll/validate                            advisory report (GET)
/// /payroll/fix-batch-status                    status fixer (POST)
/// /payroll/batches/{id}                        batch with lines (GET)
///
/// /change-requests                             list, submit
/// /change-requests/{id}/approve                approve + apply (POST)
/// /change-requests/{id}/reject                 reject (POST)
///
/// /roles/{role}/permissions                    resolved grant (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Product pricing and deadline approval workflow.
        .nest("/proposals", proposal::router())
        // Attendance recording.
        .nest("/attendance", attendance::recording_router())
        // Employee-scoped attendance queries.
        .nest("/employees", attendance::employee_router())
        // Exception requests (excuses, leave, overtime).
        .nest("/requests", requests::router())
        // Payroll validation and the batch status fixer.
        .nest("/payroll", payroll::router())
        // Employee data change requests.
        .nest("/change-requests", change_request::router())
        // Role/permission resolution.
        .nest("/roles", roles::router())
}
