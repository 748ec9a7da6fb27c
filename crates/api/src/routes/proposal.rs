//! Route definitions for the proposal approval workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::proposal;
use crate::state::AppState;

/// Proposal routes, nested under `/proposals`.
///
/// ```text
/// POST   /                          submit
/// GET    /                          list
/// GET    /{id}                      get_by_id
/// POST   /{id}/propose-price        propose_price (PPIC)
/// POST   /{id}/approve-deadline     approve_deadline (PPIC)
/// POST   /{id}/reject-deadline      reject_deadline (PPIC)
/// POST   /{id}/modify-deadline      modify_deadline (PPIC)
/// POST   /{id}/approve-price        approve_price (Finance)
/// POST   /{id}/reject-price         reject_price (Finance)
/// POST   /{id}/approve-appeal       approve_appeal (Finance)
/// POST   /{id}/confirm              confirm (Marketing)
/// POST   /{id}/reject               reject (Marketing)
/// POST   /{id}/cancel               cancel (Marketing)
/// POST   /{id}/appeal-price         appeal_price (Marketing)
/// POST   /{id}/appeal-deadline      appeal_deadline (Marketing)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(proposal::submit).get(proposal::list))
        .route("/{id}", get(proposal::get_by_id))
        .route("/{id}/propose-price", post(proposal::propose_price))
        .route("/{id}/approve-deadline", post(proposal::approve_deadline))
        .route("/{id}/reject-deadline", post(proposal::reject_deadline))
        .route("/{id}/modify-deadline", post(proposal::modify_deadline))
        .route("/{id}/approve-price", post(proposal::approve_price))
        .route("/{id}/reject-price", post(proposal::reject_price))
        .route("/{id}/approve-appeal", post(proposal::approve_appeal))
        .route("/{id}/confirm", post(proposal::confirm))
        .route("/{id}/reject", post(proposal::reject))
        .route("/{id}/cancel", post(proposal::cancel))
        .route("/{id}/appeal-price", post(proposal::appeal_price))
        .route("/{id}/appeal-deadline", post(proposal::appeal_deadline))
}
