//! Repository for the `employees` table.

use sqlx::{PgPool, Postgres, Transaction};

use kencana_core::types::DbId;

use crate::models::employee::Employee;

/// Column list for employees queries.
const COLUMNS: &str = "id, full_name, status, ktp_number, address, phone, email, \
    emergency_phone, npwp_number, tax_status, bank_name, bank_account_number, \
    bank_account_holder, created_at, updated_at";

/// Provides read operations and the typed field-update used by approved
/// change requests.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Find an employee by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List employees eligible for payroll: active and with an identity
    /// (KTP) number on file.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees
             WHERE status = 'active' AND ktp_number IS NOT NULL
             ORDER BY full_name ASC"
        );
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Write one typed field inside an open transaction. `column` must come
    /// from `ChangeField::column()`, a closed registry of known columns;
    /// this function is the single dispatch target for change-request
    /// approval and is never called with caller-supplied column names.
    pub async fn set_field(
        tx: &mut Transaction<'_, Postgres>,
        employee_id: DbId,
        column: &'static str,
        value: &str,
    ) -> Result<(), sqlx::Error> {
        let query =
            format!("UPDATE employees SET {column} = $2, updated_at = NOW() WHERE id = $1");
        sqlx::query(&query)
            .bind(employee_id)
            .bind(value)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
