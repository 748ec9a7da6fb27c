//! Route definitions for payroll validation and the batch fixer.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payroll;
use crate::state::AppState;

/// Payroll routes, nested under `/payroll`.
///
/// ```text
/// GET    /validate                  validate (?start=&end=)
/// POST   /fix-batch-status          fix_batch_status
/// GET    /batches/{id}              get_batch
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", get(payroll::validate))
        .route("/fix-batch-status", post(payroll::fix_batch_status))
        .route("/batches/{id}", get(payroll::get_batch))
}
