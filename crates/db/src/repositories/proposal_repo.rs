//! Repository for the `sellable_products` table: the pricing/deadline
//! approval state machine.
//!
//! Every mutating operation is a guarded transition executed as one
//! transaction: the row is locked with `SELECT ... FOR UPDATE`, the current
//! status is checked against the operation's precondition, and only then is
//! the new status written. A failed guard drops the transaction, so
//! concurrent actors cannot interleave into an inconsistent combined state
//! and a rejected operation leaves the row byte-for-byte unchanged.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};

use kencana_core::error::CoreError;
use kencana_core::proposal::{
    self, DeadlineStatus, PriceStatus,
};
use kencana_core::types::DbId;

use crate::error::{DbError, DbResult};
use crate::models::proposal::{
    AppealDeadlineRequest, AppealPriceRequest, ApprovePriceRequest, ModifyDeadlineRequest,
    SellableProduct, SubmitProposal,
};

/// Column list for sellable_products queries.
const COLUMNS: &str = "id, name, description, \
    price_proposed_by_ppic, price_approved_by_finance, finance_margin_percent, \
    price_appeal_by_marketing, price_appeal_reason, price_reason_finance, \
    finished_goods_deadline_marketing, shipping_deadline_marketing, \
    finished_goods_deadline_ppic, shipping_deadline_ppic, \
    deadline_appeal_reason, deadline_reason_ppic, \
    price_status, deadline_status, \
    submitted_by, approved_or_rejected_by, \
    submitted_at, responded_at, deadline_responded_at_ppic, \
    created_at, updated_at";

/// Provides the guarded transition operations for product proposals.
pub struct ProposalRepo;

impl ProposalRepo {
    /// Marketing submits a new proposal. Starts in
    /// (`pending`, `awaiting_ppic_review`).
    pub async fn create(
        pool: &PgPool,
        submitted_by: DbId,
        input: &SubmitProposal,
    ) -> DbResult<SellableProduct> {
        if input.name.trim().is_empty() {
            return Err(CoreError::Validation("name must not be empty".to_string()).into());
        }
        let today = Utc::now().date_naive();
        proposal::validate_deadline_pair(
            today,
            input.finished_goods_deadline,
            input.shipping_deadline,
        )?;

        let query = format!(
            "INSERT INTO sellable_products
                (name, description,
                 finished_goods_deadline_marketing, shipping_deadline_marketing,
                 submitted_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let proposal = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.finished_goods_deadline)
            .bind(input.shipping_deadline)
            .bind(submitted_by)
            .fetch_one(pool)
            .await?;
        Ok(proposal)
    }

    /// Find a proposal by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SellableProduct>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sellable_products WHERE id = $1");
        sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List proposals, optionally filtered by price status, newest first.
    pub async fn list(
        pool: &PgPool,
        price_status: Option<&str>,
    ) -> Result<Vec<SellableProduct>, sqlx::Error> {
        match price_status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM sellable_products
                     WHERE price_status = $1
                     ORDER BY submitted_at DESC"
                );
                sqlx::query_as::<_, SellableProduct>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM sellable_products ORDER BY submitted_at DESC"
                );
                sqlx::query_as::<_, SellableProduct>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// PPIC proposes a price. `pending` -> `awaiting_finance_approval`.
    pub async fn ppic_propose_price(
        pool: &PgPool,
        id: DbId,
        price: i64,
    ) -> DbResult<SellableProduct> {
        proposal::validate_price(price)?;

        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        proposal::require_price_status(
            price_status(&current)?,
            &[PriceStatus::Pending],
            "propose price",
        )?;

        let query = format!(
            "UPDATE sellable_products
             SET price_proposed_by_ppic = $2, price_status = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(price)
            .bind(PriceStatus::AwaitingFinanceApproval.as_str())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// PPIC accepts Marketing's dates as-is, copying them into the PPIC
    /// deadline fields. `awaiting_ppic_review`/`appeal_deadline` ->
    /// `approved_by_ppic`.
    pub async fn ppic_approve_deadline(
        pool: &PgPool,
        id: DbId,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        proposal::require_deadline_status(
            deadline_status(&current)?,
            &[DeadlineStatus::AwaitingPpicReview, DeadlineStatus::AppealDeadline],
            "approve deadline",
        )?;

        let query = format!(
            "UPDATE sellable_products
             SET finished_goods_deadline_ppic = finished_goods_deadline_marketing,
                 shipping_deadline_ppic = shipping_deadline_marketing,
                 deadline_status = $2,
                 approved_or_rejected_by = $3,
                 deadline_responded_at_ppic = NOW(),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(DeadlineStatus::ApprovedByPpic.as_str())
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// PPIC rejects the dates with a required reason.
    /// `awaiting_ppic_review`/`appeal_deadline` -> `rejected_by_ppic`.
    pub async fn ppic_reject_deadline(
        pool: &PgPool,
        id: DbId,
        reason: &str,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        proposal::require_reason(reason, "reject deadline")?;

        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        proposal::require_deadline_status(
            deadline_status(&current)?,
            &[DeadlineStatus::AwaitingPpicReview, DeadlineStatus::AppealDeadline],
            "reject deadline",
        )?;

        let query = format!(
            "UPDATE sellable_products
             SET deadline_status = $2,
                 deadline_reason_ppic = $3,
                 approved_or_rejected_by = $4,
                 deadline_responded_at_ppic = NOW(),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(DeadlineStatus::RejectedByPpic.as_str())
            .bind(reason)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// PPIC counter-proposes different dates with a required reason.
    /// `awaiting_ppic_review`/`appeal_deadline` -> `modified_by_ppic`.
    pub async fn ppic_modify_deadline(
        pool: &PgPool,
        id: DbId,
        input: &ModifyDeadlineRequest,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        proposal::require_reason(&input.reason, "modify deadline")?;
        let today = Utc::now().date_naive();
        proposal::validate_deadline_pair(
            today,
            input.finished_goods_deadline,
            input.shipping_deadline,
        )?;

        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        proposal::require_deadline_status(
            deadline_status(&current)?,
            &[DeadlineStatus::AwaitingPpicReview, DeadlineStatus::AppealDeadline],
            "modify deadline",
        )?;

        let query = format!(
            "UPDATE sellable_products
             SET finished_goods_deadline_ppic = $2,
                 shipping_deadline_ppic = $3,
                 deadline_status = $4,
                 deadline_reason_ppic = $5,
                 approved_or_rejected_by = $6,
                 deadline_responded_at_ppic = NOW(),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(input.finished_goods_deadline)
            .bind(input.shipping_deadline)
            .bind(DeadlineStatus::ModifiedByPpic.as_str())
            .bind(&input.reason)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Finance approves the price with a margin.
    /// `awaiting_finance_approval` -> `approved`.
    pub async fn finance_approve_price(
        pool: &PgPool,
        id: DbId,
        input: &ApprovePriceRequest,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        Self::finance_approve(pool, id, input, actor, &[PriceStatus::AwaitingFinanceApproval], "approve price")
            .await
    }

    /// Finance approves an appealed price. `price_appeal` -> `approved`.
    pub async fn finance_approve_appeal(
        pool: &PgPool,
        id: DbId,
        input: &ApprovePriceRequest,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        Self::finance_approve(pool, id, input, actor, &[PriceStatus::PriceAppeal], "approve appeal")
            .await
    }

    /// Shared write for the two finance approval paths.
    async fn finance_approve(
        pool: &PgPool,
        id: DbId,
        input: &ApprovePriceRequest,
        actor: DbId,
        allowed: &[PriceStatus],
        action: &'static str,
    ) -> DbResult<SellableProduct> {
        proposal::validate_price(input.price)?;
        proposal::validate_margin_percent(input.margin_percent)?;

        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        proposal::require_price_status(price_status(&current)?, allowed, action)?;

        let query = format!(
            "UPDATE sellable_products
             SET price_approved_by_finance = $2,
                 finance_margin_percent = $3,
                 price_status = $4,
                 approved_or_rejected_by = $5,
                 responded_at = NOW(),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(input.price)
            .bind(input.margin_percent)
            .bind(PriceStatus::Approved.as_str())
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Finance rejects the price; reason is optional.
    /// `awaiting_finance_approval`/`price_appeal` -> `rejected`.
    pub async fn finance_reject_price(
        pool: &PgPool,
        id: DbId,
        reason: Option<&str>,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        proposal::require_price_status(
            price_status(&current)?,
            &[PriceStatus::AwaitingFinanceApproval, PriceStatus::PriceAppeal],
            "reject price",
        )?;

        let query = format!(
            "UPDATE sellable_products
             SET price_status = $2,
                 price_reason_finance = $3,
                 approved_or_rejected_by = $4,
                 responded_at = NOW(),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(PriceStatus::Rejected.as_str())
            .bind(reason)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Marketing accepts the approved price, locking both tracks. Requires
    /// the original submitter; the only transition that reaches
    /// (`confirmed_by_marketing`, `final`).
    pub async fn marketing_confirm(
        pool: &PgPool,
        id: DbId,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        require_submitter(&current, actor)?;
        proposal::ensure_can_confirm(price_status(&current)?, deadline_status(&current)?)?;

        let query = format!(
            "UPDATE sellable_products
             SET price_status = $2, deadline_status = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(PriceStatus::ConfirmedByMarketing.as_str())
            .bind(DeadlineStatus::Final.as_str())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Marketing declines the approved price. `approved` -> `rejected`.
    pub async fn marketing_reject(
        pool: &PgPool,
        id: DbId,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        require_submitter(&current, actor)?;
        proposal::require_price_status(
            price_status(&current)?,
            &[PriceStatus::Approved],
            "reject approved price",
        )?;

        let query = format!(
            "UPDATE sellable_products
             SET price_status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(PriceStatus::Rejected.as_str())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Marketing withdraws the proposal from any non-terminal state.
    /// Unilateral override; no reverse transition exists.
    pub async fn marketing_cancel(
        pool: &PgPool,
        id: DbId,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        require_submitter(&current, actor)?;
        proposal::ensure_cancellable(price_status(&current)?)?;

        let query = format!(
            "UPDATE sellable_products
             SET price_status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(PriceStatus::Cancelled.as_str())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Marketing appeals an approved/rejected price with a counter-price and
    /// a required reason. -> `price_appeal`.
    pub async fn marketing_appeal_price(
        pool: &PgPool,
        id: DbId,
        input: &AppealPriceRequest,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        proposal::validate_price(input.price)?;
        proposal::require_reason(&input.reason, "appeal price")?;

        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        require_submitter(&current, actor)?;
        proposal::require_price_status(
            price_status(&current)?,
            &[PriceStatus::Approved, PriceStatus::Rejected],
            "appeal price",
        )?;

        let query = format!(
            "UPDATE sellable_products
             SET price_appeal_by_marketing = $2,
                 price_appeal_reason = $3,
                 price_status = $4,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(input.price)
            .bind(&input.reason)
            .bind(PriceStatus::PriceAppeal.as_str())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Marketing appeals PPIC's deadline modification/rejection with new
    /// dates and a required reason. -> `appeal_deadline`, reopening PPIC
    /// review.
    pub async fn marketing_appeal_deadline(
        pool: &PgPool,
        id: DbId,
        input: &AppealDeadlineRequest,
        actor: DbId,
    ) -> DbResult<SellableProduct> {
        proposal::require_reason(&input.reason, "appeal deadline")?;
        let today = Utc::now().date_naive();
        proposal::validate_deadline_pair(
            today,
            input.finished_goods_deadline,
            input.shipping_deadline,
        )?;

        let mut tx = pool.begin().await?;
        let current = lock_for_update(&mut tx, id).await?;
        require_submitter(&current, actor)?;
        proposal::require_deadline_status(
            deadline_status(&current)?,
            &[DeadlineStatus::ModifiedByPpic, DeadlineStatus::RejectedByPpic],
            "appeal deadline",
        )?;

        let query = format!(
            "UPDATE sellable_products
             SET finished_goods_deadline_marketing = $2,
                 shipping_deadline_marketing = $3,
                 deadline_appeal_reason = $4,
                 deadline_status = $5,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, SellableProduct>(&query)
            .bind(id)
            .bind(input.finished_goods_deadline)
            .bind(input.shipping_deadline)
            .bind(&input.reason)
            .bind(DeadlineStatus::AppealDeadline.as_str())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }
}

/// Lock a proposal row for the duration of the transaction.
async fn lock_for_update(
    tx: &mut Transaction<'_, Postgres>,
    id: DbId,
) -> DbResult<SellableProduct> {
    let query = format!("SELECT {COLUMNS} FROM sellable_products WHERE id = $1 FOR UPDATE");
    sqlx::query_as::<_, SellableProduct>(&query)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(DbError::Core(CoreError::NotFound {
            entity: "Proposal",
            id,
        }))
}

/// Marketing-side operations are restricted to the original submitter.
/// Checked before any status inspection so non-submitters learn nothing
/// about the proposal's state.
fn require_submitter(current: &SellableProduct, actor: DbId) -> Result<(), CoreError> {
    if current.submitted_by != actor {
        return Err(CoreError::Forbidden(
            "only the submitting marketing user may perform this action".to_string(),
        ));
    }
    Ok(())
}

fn price_status(current: &SellableProduct) -> Result<PriceStatus, CoreError> {
    PriceStatus::parse(&current.price_status)
}

fn deadline_status(current: &SellableProduct) -> Result<DeadlineStatus, CoreError> {
    DeadlineStatus::parse(&current.deadline_status)
}
