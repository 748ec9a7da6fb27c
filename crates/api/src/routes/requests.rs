//! Route definitions for exception requests.

use axum::routing::post;
use axum::Router;

use crate::handlers::request;
use crate::state::AppState;

/// Exception request routes, nested under `/requests`.
///
/// ```text
/// POST   /                          create
/// GET    /                          list (?employee_id=&status=)
/// POST   /{id}/approve              approve
/// POST   /{id}/reject               reject
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(request::create).get(request::list))
        .route("/{id}/approve", post(request::approve))
        .route("/{id}/reject", post(request::reject))
}
