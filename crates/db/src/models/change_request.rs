//! Employee data change-request model and DTO.

use kencana_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `employee_change_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EmployeeChangeRequest {
    pub id: DbId,
    pub employee_id: DbId,
    pub change_type: String,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: String,
    pub status: String,
    pub decided_by: Option<DbId>,
    pub requested_at: Timestamp,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for submitting a change request. The (change_type,
/// field_name) pair must match the typed field registry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChangeRequest {
    pub change_type: String,
    pub field_name: String,
    pub new_value: String,
}
