//! Sellable-product proposal model and request DTOs.

use chrono::NaiveDate;
use kencana_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sellable_products` table: the full field set exposed to
/// the display/query surface.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SellableProduct {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,

    pub price_proposed_by_ppic: Option<i64>,
    pub price_approved_by_finance: Option<i64>,
    pub finance_margin_percent: Option<f64>,
    pub price_appeal_by_marketing: Option<i64>,
    pub price_appeal_reason: Option<String>,
    pub price_reason_finance: Option<String>,

    pub finished_goods_deadline_marketing: NaiveDate,
    pub shipping_deadline_marketing: NaiveDate,
    pub finished_goods_deadline_ppic: Option<NaiveDate>,
    pub shipping_deadline_ppic: Option<NaiveDate>,
    pub deadline_appeal_reason: Option<String>,
    pub deadline_reason_ppic: Option<String>,

    pub price_status: String,
    pub deadline_status: String,

    pub submitted_by: DbId,
    pub approved_or_rejected_by: Option<DbId>,

    pub submitted_at: Timestamp,
    pub responded_at: Option<Timestamp>,
    pub deadline_responded_at_ppic: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for Marketing's proposal submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitProposal {
    pub name: String,
    pub description: Option<String>,
    pub finished_goods_deadline: NaiveDate,
    pub shipping_deadline: NaiveDate,
}

/// Request body for PPIC's price proposal.
#[derive(Debug, Clone, Deserialize)]
pub struct ProposePriceRequest {
    pub price: i64,
}

/// Request body for Finance's price approval (initial or appeal).
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovePriceRequest {
    pub price: i64,
    pub margin_percent: f64,
}

/// Request body for Finance's price rejection. Reason is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectPriceRequest {
    pub reason: Option<String>,
}

/// Request body for PPIC's deadline rejection. Reason is required.
#[derive(Debug, Clone, Deserialize)]
pub struct RejectDeadlineRequest {
    pub reason: String,
}

/// Request body for PPIC's deadline modification.
#[derive(Debug, Clone, Deserialize)]
pub struct ModifyDeadlineRequest {
    pub finished_goods_deadline: NaiveDate,
    pub shipping_deadline: NaiveDate,
    pub reason: String,
}

/// Request body for Marketing's price appeal.
#[derive(Debug, Clone, Deserialize)]
pub struct AppealPriceRequest {
    pub price: i64,
    pub reason: String,
}

/// Request body for Marketing's deadline appeal.
#[derive(Debug, Clone, Deserialize)]
pub struct AppealDeadlineRequest {
    pub finished_goods_deadline: NaiveDate,
    pub shipping_deadline: NaiveDate,
    pub reason: String,
}
