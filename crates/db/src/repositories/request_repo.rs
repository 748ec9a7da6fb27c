//! Repository for the `exception_requests` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use kencana_core::attendance::{
    validate_request_type, REQUEST_ABSENCE_EXCUSE, REQUEST_APPROVED, REQUEST_EARLY_LEAVE_EXCUSE,
    REQUEST_LATENESS_EXCUSE, REQUEST_LEAVE, REQUEST_OVERTIME, REQUEST_PENDING, REQUEST_REJECTED,
};
use kencana_core::error::CoreError;
use kencana_core::payroll::PendingRequests;
use kencana_core::proposal::require_reason;
use kencana_core::types::DbId;

use crate::error::{DbError, DbResult};
use crate::models::request::{CreateExceptionRequest, ExceptionRequest};

/// Column list for exception_requests queries.
const COLUMNS: &str = "id, employee_id, request_type, request_date, start_date, end_date, \
    overtime_hours, reason, status, approved_by, requested_at, decided_at, \
    created_at, updated_at";

/// Provides CRUD and the reconciliation lookups for exception requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Submit a new request in `pending` status.
    pub async fn create(
        pool: &PgPool,
        employee_id: DbId,
        input: &CreateExceptionRequest,
    ) -> DbResult<ExceptionRequest> {
        validate_request_type(&input.request_type)?;
        require_reason(&input.reason, "submit request")?;
        validate_request_dates(input)?;

        let query = format!(
            "INSERT INTO exception_requests
                (employee_id, request_type, request_date, start_date, end_date,
                 overtime_hours, reason)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, ExceptionRequest>(&query)
            .bind(employee_id)
            .bind(&input.request_type)
            .bind(input.request_date)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.overtime_hours)
            .bind(&input.reason)
            .fetch_one(pool)
            .await?;
        Ok(request)
    }

    /// Approve a pending request, recording the approver.
    pub async fn approve(pool: &PgPool, id: DbId, approver: DbId) -> DbResult<ExceptionRequest> {
        Self::decide(pool, id, approver, REQUEST_APPROVED, "approve request").await
    }

    /// Reject a pending request, recording the approver.
    pub async fn reject(pool: &PgPool, id: DbId, approver: DbId) -> DbResult<ExceptionRequest> {
        Self::decide(pool, id, approver, REQUEST_REJECTED, "reject request").await
    }

    /// Shared pending -> decided transition, row-locked.
    async fn decide(
        pool: &PgPool,
        id: DbId,
        approver: DbId,
        new_status: &'static str,
        action: &'static str,
    ) -> DbResult<ExceptionRequest> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM exception_requests WHERE id = $1 FOR UPDATE"
        );
        let current = sqlx::query_as::<_, ExceptionRequest>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound {
                entity: "ExceptionRequest",
                id,
            }))?;

        if current.status != REQUEST_PENDING {
            return Err(CoreError::InvalidStateTransition {
                action,
                expected: "'pending'",
                actual: current.status,
            }
            .into());
        }

        let query = format!(
            "UPDATE exception_requests
             SET status = $2, approved_by = $3, decided_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ExceptionRequest>(&query)
            .bind(id)
            .bind(new_status)
            .bind(approver)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// List requests, optionally filtered by employee and status.
    pub async fn list(
        pool: &PgPool,
        employee_id: Option<DbId>,
        status: Option<&str>,
    ) -> Result<Vec<ExceptionRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM exception_requests
             WHERE ($1::BIGINT IS NULL OR employee_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY requested_at DESC"
        );
        sqlx::query_as::<_, ExceptionRequest>(&query)
            .bind(employee_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Dates within the period covered by an approved lateness excuse for
    /// this employee. Pending or rejected excuses do not count.
    pub async fn approved_lateness_excuse_dates(
        pool: &PgPool,
        employee_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT request_date FROM exception_requests
             WHERE employee_id = $1
               AND request_type = $2
               AND status = 'approved'
               AND request_date BETWEEN $3 AND $4",
        )
        .bind(employee_id)
        .bind(REQUEST_LATENESS_EXCUSE)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Pending request counts per category for one employee over an
    /// inclusive period. Single-date requests match on `request_date`;
    /// leave spans match on inclusive range overlap, including spans that
    /// fully contain the period.
    pub async fn pending_counts(
        pool: &PgPool,
        employee_id: DbId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PendingRequests, sqlx::Error> {
        let permission: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM exception_requests
             WHERE employee_id = $1
               AND request_type IN ($2, $3, $4)
               AND status = 'pending'
               AND request_date BETWEEN $5 AND $6",
        )
        .bind(employee_id)
        .bind(REQUEST_LATENESS_EXCUSE)
        .bind(REQUEST_EARLY_LEAVE_EXCUSE)
        .bind(REQUEST_ABSENCE_EXCUSE)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        let overtime: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM exception_requests
             WHERE employee_id = $1
               AND request_type = $2
               AND status = 'pending'
               AND request_date BETWEEN $3 AND $4",
        )
        .bind(employee_id)
        .bind(REQUEST_OVERTIME)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        let leave: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM exception_requests
             WHERE employee_id = $1
               AND request_type = $2
               AND status = 'pending'
               AND start_date <= $4
               AND end_date >= $3",
        )
        .bind(employee_id)
        .bind(REQUEST_LEAVE)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(PendingRequests::new(permission, overtime, leave))
    }
}

/// Per-type date shape validation: single-date types need `request_date`,
/// leave needs an ordered `start_date`/`end_date` span, overtime needs
/// positive hours.
fn validate_request_dates(input: &CreateExceptionRequest) -> Result<(), CoreError> {
    match input.request_type.as_str() {
        REQUEST_LEAVE => {
            let (start, end) = match (input.start_date, input.end_date) {
                (Some(s), Some(e)) => (s, e),
                _ => {
                    return Err(CoreError::Validation(
                        "leave requests require start_date and end_date".to_string(),
                    ))
                }
            };
            if start > end {
                return Err(CoreError::Validation(
                    "start_date must not be after end_date".to_string(),
                ));
            }
        }
        REQUEST_OVERTIME => {
            if input.request_date.is_none() {
                return Err(CoreError::Validation(
                    "overtime requests require request_date".to_string(),
                ));
            }
            match input.overtime_hours {
                Some(h) if h > 0.0 => {}
                _ => {
                    return Err(CoreError::Validation(
                        "overtime requests require positive overtime_hours".to_string(),
                    ))
                }
            }
        }
        _ => {
            if input.request_date.is_none() {
                return Err(CoreError::Validation(format!(
                    "{} requests require request_date",
                    input.request_type
                )));
            }
        }
    }
    Ok(())
}
