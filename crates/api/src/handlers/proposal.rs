//! Handlers for the sellable-product proposal workflow.
//!
//! Marketing submits, PPIC reviews price and deadlines, Finance decides on
//! price, and Marketing confirms, rejects, cancels, or appeals. Every
//! transition handler logs the acting user and the resulting statuses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use kencana_core::error::CoreError;
use kencana_core::roles::{
    PERM_PROPOSAL_DEADLINE_REVIEW, PERM_PROPOSAL_FINANCE_DECIDE, PERM_PROPOSAL_PRICE_REVIEW,
    PERM_PROPOSAL_SUBMIT,
};
use kencana_core::types::DbId;
use kencana_db::models::proposal::{
    AppealDeadlineRequest, AppealPriceRequest, ApprovePriceRequest, ModifyDeadlineRequest,
    ProposePriceRequest, RejectDeadlineRequest, RejectPriceRequest, SubmitProposal,
};
use kencana_db::repositories::ProposalRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::require_permission;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the proposal list.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub price_status: Option<String>,
}

/// POST /api/v1/proposals
///
/// Marketing submits a new proposal with name and deadline pair.
pub async fn submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitProposal>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_SUBMIT)?;

    let proposal = ProposalRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = proposal.id,
        name = %proposal.name,
        "Proposal submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: proposal })))
}

/// GET /api/v1/proposals
///
/// List proposals, optionally filtered by price status.
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let proposals = ProposalRepo::list(&state.pool, query.price_status.as_deref()).await?;
    Ok(Json(DataResponse { data: proposals }))
}

/// GET /api/v1/proposals/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let proposal = ProposalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }))?;
    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/propose-price
///
/// PPIC proposes a production price for a pending proposal.
pub async fn propose_price(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ProposePriceRequest>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_PRICE_REVIEW)?;

    let proposal = ProposalRepo::ppic_propose_price(&state.pool, id, input.price).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        price = input.price,
        price_status = %proposal.price_status,
        "Price proposed"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/approve-deadline
///
/// PPIC accepts Marketing's dates as-is.
pub async fn approve_deadline(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_DEADLINE_REVIEW)?;

    let proposal = ProposalRepo::ppic_approve_deadline(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        deadline_status = %proposal.deadline_status,
        "Deadline approved"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/reject-deadline
///
/// PPIC rejects the dates; reason is required.
pub async fn reject_deadline(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectDeadlineRequest>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_DEADLINE_REVIEW)?;

    let proposal =
        ProposalRepo::ppic_reject_deadline(&state.pool, id, &input.reason, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        deadline_status = %proposal.deadline_status,
        "Deadline rejected"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/modify-deadline
///
/// PPIC counter-proposes different dates; reason is required.
pub async fn modify_deadline(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ModifyDeadlineRequest>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_DEADLINE_REVIEW)?;

    let proposal = ProposalRepo::ppic_modify_deadline(&state.pool, id, &input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        deadline_status = %proposal.deadline_status,
        "Deadline modified"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/approve-price
///
/// Finance approves the proposed price with a margin.
pub async fn approve_price(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApprovePriceRequest>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_FINANCE_DECIDE)?;

    let proposal = ProposalRepo::finance_approve_price(&state.pool, id, &input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        price = input.price,
        margin_percent = input.margin_percent,
        price_status = %proposal.price_status,
        "Price approved"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/reject-price
///
/// Finance rejects the price; reason is optional.
pub async fn reject_price(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectPriceRequest>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_FINANCE_DECIDE)?;

    let proposal =
        ProposalRepo::finance_reject_price(&state.pool, id, input.reason.as_deref(), auth.user_id)
            .await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        price_status = %proposal.price_status,
        "Price rejected"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/approve-appeal
///
/// Finance approves an appealed price.
pub async fn approve_appeal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApprovePriceRequest>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_FINANCE_DECIDE)?;

    let proposal =
        ProposalRepo::finance_approve_appeal(&state.pool, id, &input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        price = input.price,
        price_status = %proposal.price_status,
        "Price appeal approved"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/confirm
///
/// The submitting marketer locks both tracks. Requires an approved price and
/// a PPIC-settled deadline.
pub async fn confirm(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_SUBMIT)?;

    let proposal = ProposalRepo::marketing_confirm(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        price_status = %proposal.price_status,
        deadline_status = %proposal.deadline_status,
        "Proposal confirmed"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/reject
///
/// The submitting marketer declines the approved price.
pub async fn reject(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_SUBMIT)?;

    let proposal = ProposalRepo::marketing_reject(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        price_status = %proposal.price_status,
        "Approved price declined"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/cancel
///
/// The submitting marketer withdraws the proposal from any non-terminal state.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_SUBMIT)?;

    let proposal = ProposalRepo::marketing_cancel(&state.pool, id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        price_status = %proposal.price_status,
        "Proposal cancelled"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/appeal-price
///
/// The submitting marketer appeals with a counter-price and a reason.
pub async fn appeal_price(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AppealPriceRequest>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_SUBMIT)?;

    let proposal =
        ProposalRepo::marketing_appeal_price(&state.pool, id, &input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        price = input.price,
        price_status = %proposal.price_status,
        "Price appealed"
    );

    Ok(Json(DataResponse { data: proposal }))
}

/// POST /api/v1/proposals/{id}/appeal-deadline
///
/// The submitting marketer appeals PPIC's deadline decision with new dates,
/// reopening PPIC review.
pub async fn appeal_deadline(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AppealDeadlineRequest>,
) -> AppResult<impl IntoResponse> {
    require_permission(&state, &auth, PERM_PROPOSAL_SUBMIT)?;

    let proposal =
        ProposalRepo::marketing_appeal_deadline(&state.pool, id, &input, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        proposal_id = id,
        deadline_status = %proposal.deadline_status,
        "Deadline appealed"
    );

    Ok(Json(DataResponse { data: proposal }))
}
