//! Route definitions for attendance recording and queries.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Recording routes, nested under `/attendance`.
///
/// ```text
/// POST   /clock-in                  clock_in
/// POST   /clock-out                 clock_out
/// ```
pub fn recording_router() -> Router<AppState> {
    Router::new()
        .route("/clock-in", post(attendance::clock_in))
        .route("/clock-out", post(attendance::clock_out))
}

/// Employee-scoped query routes, nested under `/employees`.
///
/// ```text
/// GET    /{id}/attendance-summary   attendance_summary (?start=&end=)
/// GET    /{id}/pending-requests     pending_requests (?start=&end=)
/// ```
pub fn employee_router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/attendance-summary",
            get(attendance::attendance_summary),
        )
        .route("/{id}/pending-requests", get(attendance::pending_requests))
}
