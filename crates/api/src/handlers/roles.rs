//! Handler for role/permission resolution queries.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Resolved grant for one role. Unknown roles resolve to empty grants rather
/// than an error.
#[derive(Debug, Serialize)]
pub struct RoleGrantResponse {
    pub role: String,
    pub permissions: Vec<String>,
    pub modules: Vec<String>,
}

/// GET /api/v1/roles/{role}/permissions
pub async fn get_permissions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> AppResult<impl IntoResponse> {
    let grant = RoleGrantResponse {
        permissions: state.roles.permissions_for(&role).to_vec(),
        modules: state.roles.modules_for(&role).to_vec(),
        role,
    };
    Ok(Json(DataResponse { data: grant }))
}
