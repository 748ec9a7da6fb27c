//! Handlers for employee data change requests.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use kencana_core::roles::PERM_CHANGE_REQUEST_APPROVE;
use kencana_core::types::DbId;
use kencana_db::models::change_request::CreateChangeRequest;
use kencana_db::repositories::ChangeRequestRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the change-request list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub employee_id: Option<DbId>,
}

/// POST /api/v1/change-requests
///
/// Submit a change to one of the authenticated employee's registered fields.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateChangeRequest>,
) -> AppResult<impl IntoResponse> {
    let request = ChangeRequestRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = request.id,
        change_type = %request.change_type,
        field_name = %request.field_name,
        "Change request submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// POST /api/v1/change-requests/{id}/approve
///
/// Approve and apply the change to the employee's typed column.
pub async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_CHANGE_REQUEST_APPROVE)?;

    let request = ChangeRequestRepo::approve(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = id,
        employee_id = request.employee_id,
        field_name = %request.field_name,
        "Change request approved"
    );

    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/change-requests/{id}/reject
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_CHANGE_REQUEST_APPROVE)?;

    let request = ChangeRequestRepo::reject(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = id,
        employee_id = request.employee_id,
        "Change request rejected"
    );

    Ok(Json(DataResponse { data: request }))
}

/// GET /api/v1/change-requests?employee_id=
///
/// Employees may list their own; listing others requires the approval
/// permission.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    if query.employee_id != Some(auth.user_id) {
        require_permission(&state, &auth, PERM_CHANGE_REQUEST_APPROVE)?;
    }

    let requests = ChangeRequestRepo::list(&state.pool, query.employee_id).await?;
    Ok(Json(DataResponse { data: requests }))
}
