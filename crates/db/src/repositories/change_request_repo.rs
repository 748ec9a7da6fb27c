//! Repository for the `employee_change_requests` table.
//!
//! Approval applies the requested value to the employee's typed column and
//! marks the request approved in the same transaction, so the two writes
//! cannot diverge.

use sqlx::PgPool;

use kencana_core::change_request::{
    validate_new_value, ChangeField, CHANGE_APPROVED, CHANGE_PENDING, CHANGE_REJECTED,
};
use kencana_core::error::CoreError;
use kencana_core::types::DbId;

use crate::error::{DbError, DbResult};
use crate::models::change_request::{CreateChangeRequest, EmployeeChangeRequest};
use crate::repositories::EmployeeRepo;

/// Column list for employee_change_requests queries.
const COLUMNS: &str = "id, employee_id, change_type, field_name, old_value, new_value, \
    status, decided_by, requested_at, decided_at, created_at, updated_at";

/// Provides CRUD and the typed approval dispatch for change requests.
pub struct ChangeRequestRepo;

impl ChangeRequestRepo {
    /// Submit a change request, capturing the field's current value for the
    /// audit trail. The (change_type, field_name) pair must be a registered
    /// typed field.
    pub async fn create(
        pool: &PgPool,
        employee_id: DbId,
        input: &CreateChangeRequest,
    ) -> DbResult<EmployeeChangeRequest> {
        let field = ChangeField::parse(&input.change_type, &input.field_name)?;
        validate_new_value(&input.new_value)?;

        let old_value: Option<String> = {
            let query = format!("SELECT {} FROM employees WHERE id = $1", field.column());
            sqlx::query_scalar(&query)
                .bind(employee_id)
                .fetch_optional(pool)
                .await?
                .ok_or(DbError::Core(CoreError::NotFound {
                    entity: "Employee",
                    id: employee_id,
                }))?
        };

        let query = format!(
            "INSERT INTO employee_change_requests
                (employee_id, change_type, field_name, old_value, new_value)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let request = sqlx::query_as::<_, EmployeeChangeRequest>(&query)
            .bind(employee_id)
            .bind(field.change_type())
            .bind(field.field_name())
            .bind(old_value)
            .bind(&input.new_value)
            .fetch_one(pool)
            .await?;
        Ok(request)
    }

    /// Approve a pending request and apply the new value to the employee's
    /// typed column, atomically.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        decided_by: DbId,
    ) -> DbResult<EmployeeChangeRequest> {
        let mut tx = pool.begin().await?;

        let query =
            format!("SELECT {COLUMNS} FROM employee_change_requests WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, EmployeeChangeRequest>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound {
                entity: "ChangeRequest",
                id,
            }))?;

        if current.status != CHANGE_PENDING {
            return Err(CoreError::InvalidStateTransition {
                action: "approve change request",
                expected: "'pending'",
                actual: current.status,
            }
            .into());
        }

        // Stored rows always hold a registered pair, but the registry is
        // re-consulted so the column name never comes from row data alone.
        let field = ChangeField::parse(&current.change_type, &current.field_name)?;
        EmployeeRepo::set_field(&mut tx, current.employee_id, field.column(), &current.new_value)
            .await?;

        let query = format!(
            "UPDATE employee_change_requests
             SET status = $2, decided_by = $3, decided_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, EmployeeChangeRequest>(&query)
            .bind(id)
            .bind(CHANGE_APPROVED)
            .bind(decided_by)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// Reject a pending request; employee data is untouched.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        decided_by: DbId,
    ) -> DbResult<EmployeeChangeRequest> {
        let mut tx = pool.begin().await?;

        let query =
            format!("SELECT {COLUMNS} FROM employee_change_requests WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, EmployeeChangeRequest>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound {
                entity: "ChangeRequest",
                id,
            }))?;

        if current.status != CHANGE_PENDING {
            return Err(CoreError::InvalidStateTransition {
                action: "reject change request",
                expected: "'pending'",
                actual: current.status,
            }
            .into());
        }

        let query = format!(
            "UPDATE employee_change_requests
             SET status = $2, decided_by = $3, decided_at = NOW(), updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, EmployeeChangeRequest>(&query)
            .bind(id)
            .bind(CHANGE_REJECTED)
            .bind(decided_by)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(updated)
    }

    /// List change requests, optionally filtered by employee.
    pub async fn list(
        pool: &PgPool,
        employee_id: Option<DbId>,
    ) -> Result<Vec<EmployeeChangeRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employee_change_requests
             WHERE ($1::BIGINT IS NULL OR employee_id = $1)
             ORDER BY requested_at DESC"
        );
        sqlx::query_as::<_, EmployeeChangeRequest>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }
}
