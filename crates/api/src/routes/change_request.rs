//! Route definitions for employee data change requests.

use axum::routing::post;
use axum::Router;

use crate::handlers::change_request;
use crate::state::AppState;

/// Change request routes, nested under `/change-requests`.
///
/// ```text
/// POST   /                          create
/// GET    /                          list (?employee_id=)
/// POST   /{id}/approve              approve
/// POST   /{id}/reject               reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(change_request::create).get(change_request::list))
        .route("/{id}/approve", post(change_request::approve))
        .route("/{id}/reject", post(change_request::reject))
}
