//! Handlers for exception requests (excuses, leave, overtime).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use kencana_core::roles::PERM_REQUEST_APPROVE;
use kencana_core::types::DbId;
use kencana_db::models::request::CreateExceptionRequest;
use kencana_db::repositories::RequestRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the request list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub employee_id: Option<DbId>,
    pub status: Option<String>,
}

/// POST /api/v1/requests
///
/// Submit an exception request for the authenticated employee.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateExceptionRequest>,
) -> AppResult<impl IntoResponse> {
    let request = RequestRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = request.id,
        request_type = %request.request_type,
        "Exception request submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// POST /api/v1/requests/{id}/approve
pub async fn approve(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_REQUEST_APPROVE)?;

    let request = RequestRepo::approve(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = id,
        request_type = %request.request_type,
        "Exception request approved"
    );

    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/requests/{id}/reject
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_REQUEST_APPROVE)?;

    let request = RequestRepo::reject(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        request_id = id,
        request_type = %request.request_type,
        "Exception request rejected"
    );

    Ok(Json(DataResponse { data: request }))
}

/// GET /api/v1/requests?employee_id=&status=
///
/// Employees may list their own requests; listing anyone else's requires the
/// approval permission.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    if query.employee_id != Some(auth.user_id) {
        require_permission(&state, &auth, PERM_REQUEST_APPROVE)?;
    }

    let requests =
        RequestRepo::list(&state.pool, query.employee_id, query.status.as_deref()).await?;
    Ok(Json(DataResponse { data: requests }))
}
