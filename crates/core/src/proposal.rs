//! Status enums and transition guards for the sellable-product pricing and
//! delivery-deadline approval workflow.
//!
//! A proposal carries two independent status tracks: the price track
//! (Marketing -> PPIC -> Finance, with an appeal loop) and the deadline track
//! (Marketing -> PPIC, with an appeal loop). The tracks stay decoupled; the
//! single cross-cutting rule (the deadline may only become `final` when
//! Marketing has confirmed the price) is enforced at the confirm boundary by
//! [`ensure_can_confirm`], not on every write.
//!
//! All functions here are pure. The repository layer calls them inside a
//! row-locked transaction so a guard failure leaves the row untouched.

use chrono::NaiveDate;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Price status constants
// ---------------------------------------------------------------------------

/// Submitted by Marketing, waiting for PPIC to propose a price.
pub const PRICE_PENDING: &str = "pending";
/// PPIC proposed a price, waiting for Finance.
pub const PRICE_AWAITING_FINANCE: &str = "awaiting_finance_approval";
/// Finance approved the price.
pub const PRICE_APPROVED: &str = "approved";
/// Finance or Marketing rejected the price.
pub const PRICE_REJECTED: &str = "rejected";
/// Marketing appealed a previously approved/rejected price.
pub const PRICE_APPEAL: &str = "price_appeal";
/// Marketing accepted the approved price. Terminal success.
pub const PRICE_CONFIRMED: &str = "confirmed_by_marketing";
/// Marketing withdrew the proposal. Terminal, no reverse transition.
pub const PRICE_CANCELLED: &str = "cancelled";

/// All valid price statuses.
pub const VALID_PRICE_STATUSES: &[&str] = &[
    PRICE_PENDING,
    PRICE_AWAITING_FINANCE,
    PRICE_APPROVED,
    PRICE_REJECTED,
    PRICE_APPEAL,
    PRICE_CONFIRMED,
    PRICE_CANCELLED,
];

// ---------------------------------------------------------------------------
// Deadline status constants
// ---------------------------------------------------------------------------

/// Submitted by Marketing, waiting for PPIC feasibility review.
pub const DEADLINE_AWAITING_PPIC: &str = "awaiting_ppic_review";
/// PPIC accepted Marketing's dates as-is.
pub const DEADLINE_APPROVED_BY_PPIC: &str = "approved_by_ppic";
/// PPIC counter-proposed different dates.
pub const DEADLINE_MODIFIED_BY_PPIC: &str = "modified_by_ppic";
/// PPIC rejected the dates outright.
pub const DEADLINE_REJECTED_BY_PPIC: &str = "rejected_by_ppic";
/// Marketing appealed PPIC's modification/rejection with new dates.
pub const DEADLINE_APPEAL: &str = "appeal_deadline";
/// Locked in at Marketing confirmation. Terminal.
pub const DEADLINE_FINAL: &str = "final";

/// All valid deadline statuses.
pub const VALID_DEADLINE_STATUSES: &[&str] = &[
    DEADLINE_AWAITING_PPIC,
    DEADLINE_APPROVED_BY_PPIC,
    DEADLINE_MODIFIED_BY_PPIC,
    DEADLINE_REJECTED_BY_PPIC,
    DEADLINE_APPEAL,
    DEADLINE_FINAL,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Price-track status with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceStatus {
    Pending,
    AwaitingFinanceApproval,
    Approved,
    Rejected,
    PriceAppeal,
    ConfirmedByMarketing,
    Cancelled,
}

impl PriceStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => PRICE_PENDING,
            Self::AwaitingFinanceApproval => PRICE_AWAITING_FINANCE,
            Self::Approved => PRICE_APPROVED,
            Self::Rejected => PRICE_REJECTED,
            Self::PriceAppeal => PRICE_APPEAL,
            Self::ConfirmedByMarketing => PRICE_CONFIRMED,
            Self::Cancelled => PRICE_CANCELLED,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            PRICE_PENDING => Ok(Self::Pending),
            PRICE_AWAITING_FINANCE => Ok(Self::AwaitingFinanceApproval),
            PRICE_APPROVED => Ok(Self::Approved),
            PRICE_REJECTED => Ok(Self::Rejected),
            PRICE_APPEAL => Ok(Self::PriceAppeal),
            PRICE_CONFIRMED => Ok(Self::ConfirmedByMarketing),
            PRICE_CANCELLED => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown price status: '{other}'. Valid statuses: {}",
                VALID_PRICE_STATUSES.join(", ")
            ))),
        }
    }

    /// Terminal statuses admit no further price-track transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ConfirmedByMarketing | Self::Cancelled)
    }
}

/// Deadline-track status with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    AwaitingPpicReview,
    ApprovedByPpic,
    ModifiedByPpic,
    RejectedByPpic,
    AppealDeadline,
    Final,
}

impl DeadlineStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingPpicReview => DEADLINE_AWAITING_PPIC,
            Self::ApprovedByPpic => DEADLINE_APPROVED_BY_PPIC,
            Self::ModifiedByPpic => DEADLINE_MODIFIED_BY_PPIC,
            Self::RejectedByPpic => DEADLINE_REJECTED_BY_PPIC,
            Self::AppealDeadline => DEADLINE_APPEAL,
            Self::Final => DEADLINE_FINAL,
        }
    }

    /// Parse from a string, returning an error for unknown statuses.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            DEADLINE_AWAITING_PPIC => Ok(Self::AwaitingPpicReview),
            DEADLINE_APPROVED_BY_PPIC => Ok(Self::ApprovedByPpic),
            DEADLINE_MODIFIED_BY_PPIC => Ok(Self::ModifiedByPpic),
            DEADLINE_REJECTED_BY_PPIC => Ok(Self::RejectedByPpic),
            DEADLINE_APPEAL => Ok(Self::AppealDeadline),
            DEADLINE_FINAL => Ok(Self::Final),
            other => Err(CoreError::Validation(format!(
                "Unknown deadline status: '{other}'. Valid statuses: {}",
                VALID_DEADLINE_STATUSES.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Input validators
// ---------------------------------------------------------------------------

/// Validate the deadline pair on submit, PPIC modification, and deadline
/// appeal: the finished-goods date must be strictly after `today`, and the
/// shipping date strictly after the finished-goods date.
pub fn validate_deadline_pair(
    today: NaiveDate,
    finished_goods: NaiveDate,
    shipping: NaiveDate,
) -> Result<(), CoreError> {
    if finished_goods <= today {
        return Err(CoreError::Validation(format!(
            "finished_goods_deadline must be after {today}"
        )));
    }
    if shipping <= finished_goods {
        return Err(CoreError::Validation(
            "shipping_deadline must be after finished_goods_deadline".to_string(),
        ));
    }
    Ok(())
}

/// Reject empty or whitespace-only reason text.
pub fn require_reason(reason: &str, action: &'static str) -> Result<(), CoreError> {
    if reason.trim().is_empty() {
        return Err(CoreError::Validation(format!("{action} requires a reason")));
    }
    Ok(())
}

/// Prices are stored in minor units and must be positive.
pub fn validate_price(price: i64) -> Result<(), CoreError> {
    if price <= 0 {
        return Err(CoreError::Validation("price must be positive".to_string()));
    }
    Ok(())
}

/// Finance margin is an inclusive percentage.
pub fn validate_margin_percent(pct: f64) -> Result<(), CoreError> {
    if !(0.0..=100.0).contains(&pct) || pct.is_nan() {
        return Err(CoreError::Validation(
            "finance_margin_percent must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Transition guards
// ---------------------------------------------------------------------------

/// Assert the price track is in one of `allowed`, otherwise fail with the
/// expected-vs-actual statuses for `action`.
pub fn require_price_status(
    actual: PriceStatus,
    allowed: &[PriceStatus],
    action: &'static str,
) -> Result<(), CoreError> {
    if allowed.contains(&actual) {
        return Ok(());
    }
    Err(CoreError::InvalidStateTransition {
        action,
        expected: expected_price(allowed),
        actual: actual.as_str().to_string(),
    })
}

/// Assert the deadline track is in one of `allowed`.
pub fn require_deadline_status(
    actual: DeadlineStatus,
    allowed: &[DeadlineStatus],
    action: &'static str,
) -> Result<(), CoreError> {
    if allowed.contains(&actual) {
        return Ok(());
    }
    Err(CoreError::InvalidStateTransition {
        action,
        expected: expected_deadline(allowed),
        actual: actual.as_str().to_string(),
    })
}

/// Marketing confirmation is the only place the two tracks couple: the price
/// must be finance-approved and the deadline PPIC-approved or PPIC-modified.
/// This is the sole gate through which `deadline_status` reaches `final`.
pub fn ensure_can_confirm(
    price: PriceStatus,
    deadline: DeadlineStatus,
) -> Result<(), CoreError> {
    require_price_status(price, &[PriceStatus::Approved], "confirm")?;
    require_deadline_status(
        deadline,
        &[DeadlineStatus::ApprovedByPpic, DeadlineStatus::ModifiedByPpic],
        "confirm",
    )
}

/// Marketing cancellation is a unilateral override valid from any
/// non-terminal price state.
pub fn ensure_cancellable(price: PriceStatus) -> Result<(), CoreError> {
    require_price_status(
        price,
        &[
            PriceStatus::Pending,
            PriceStatus::AwaitingFinanceApproval,
            PriceStatus::Approved,
            PriceStatus::Rejected,
            PriceStatus::PriceAppeal,
        ],
        "cancel",
    )
}

/// Human-readable precondition set for the price track.
fn expected_price(allowed: &[PriceStatus]) -> &'static str {
    match allowed {
        [PriceStatus::Pending] => "'pending'",
        [PriceStatus::AwaitingFinanceApproval] => "'awaiting_finance_approval'",
        [PriceStatus::Approved] => "'approved'",
        [PriceStatus::PriceAppeal] => "'price_appeal'",
        [PriceStatus::AwaitingFinanceApproval, PriceStatus::PriceAppeal] => {
            "one of 'awaiting_finance_approval', 'price_appeal'"
        }
        [PriceStatus::Approved, PriceStatus::Rejected] => "one of 'approved', 'rejected'",
        _ => "a non-terminal status",
    }
}

/// Human-readable precondition set for the deadline track.
fn expected_deadline(allowed: &[DeadlineStatus]) -> &'static str {
    match allowed {
        [DeadlineStatus::AwaitingPpicReview, DeadlineStatus::AppealDeadline] => {
            "one of 'awaiting_ppic_review', 'appeal_deadline'"
        }
        [DeadlineStatus::ApprovedByPpic, DeadlineStatus::ModifiedByPpic] => {
            "one of 'approved_by_ppic', 'modified_by_ppic'"
        }
        [DeadlineStatus::ModifiedByPpic, DeadlineStatus::RejectedByPpic] => {
            "one of 'modified_by_ppic', 'rejected_by_ppic'"
        }
        _ => "a reviewable status",
    }
}
