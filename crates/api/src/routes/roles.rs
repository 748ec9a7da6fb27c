//! Route definition for role/permission resolution.

use axum::routing::get;
use axum::Router;

use crate::handlers::roles;
use crate::state::AppState;

/// Role routes, nested under `/roles`.
///
/// ```text
/// GET    /{role}/permissions        get_permissions
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{role}/permissions", get(roles::get_permissions))
}
