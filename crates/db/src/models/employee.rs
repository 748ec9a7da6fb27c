//! Employee model.

use kencana_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub full_name: String,
    pub status: String,
    pub ktp_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub emergency_phone: Option<String>,
    pub npwp_number: Option<String>,
    pub tax_status: Option<String>,
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub bank_account_holder: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
