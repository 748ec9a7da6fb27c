//! Role-based access control gates.
//!
//! Permissions are resolved through the injected [`RoleConfig`] held in
//! [`AppState`], never through a process-wide table. Authorization is checked
//! before any entity state is inspected, so a caller without the permission
//! gets a 403 that reveals nothing about the entity.

use kencana_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Reject with 403 Forbidden unless the user's role holds `permission`.
///
/// ```ignore
/// require_permission(&state, &auth, PERM_PAYROLL_MANAGE)?;
/// ```
pub fn require_permission(
    state: &AppState,
    user: &AuthUser,
    permission: &str,
) -> Result<(), AppError> {
    if state.roles.is_allowed(&user.role, permission) {
        return Ok(());
    }
    Err(AppError::Core(CoreError::Forbidden(format!(
        "Role '{}' does not hold the '{permission}' permission",
        user.role
    ))))
}
