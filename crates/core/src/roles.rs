//! Role/permission resolution.
//!
//! The role table is an injected [`RoleConfig`] value rather than a
//! process-wide lookup, so tests can run against synthetic tables and the
//! HTTP layer can hold its copy in shared state.

use std::collections::HashMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Well-known role names
// ---------------------------------------------------------------------------

pub const ROLE_MARKETING: &str = "marketing";
pub const ROLE_PPIC: &str = "ppic";
pub const ROLE_FINANCE: &str = "finance";
pub const ROLE_HR: &str = "hr";
pub const ROLE_DIRECTOR: &str = "director";

// ---------------------------------------------------------------------------
// Permission names
// ---------------------------------------------------------------------------

pub const PERM_PROPOSAL_SUBMIT: &str = "proposal:submit";
pub const PERM_PROPOSAL_PRICE_REVIEW: &str = "proposal:price-review";
pub const PERM_PROPOSAL_DEADLINE_REVIEW: &str = "proposal:deadline-review";
pub const PERM_PROPOSAL_FINANCE_DECIDE: &str = "proposal:finance-decide";
pub const PERM_PAYROLL_MANAGE: &str = "payroll:manage";
pub const PERM_REQUEST_APPROVE: &str = "request:approve";
pub const PERM_CHANGE_REQUEST_APPROVE: &str = "change-request:approve";

/// Permissions and dashboard modules granted to one role.
#[derive(Debug, Clone, Serialize)]
pub struct RoleGrant {
    pub permissions: Vec<String>,
    pub modules: Vec<String>,
}

/// Injected role table: role name -> grant.
#[derive(Debug, Clone, Default)]
pub struct RoleConfig {
    grants: HashMap<String, RoleGrant>,
}

impl RoleConfig {
    /// Build from an explicit (role, permissions, modules) table.
    pub fn new<I, S>(table: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>, Vec<S>)>,
        S: Into<String>,
    {
        let grants = table
            .into_iter()
            .map(|(role, permissions, modules)| {
                (
                    role.into(),
                    RoleGrant {
                        permissions: permissions.into_iter().map(Into::into).collect(),
                        modules: modules.into_iter().map(Into::into).collect(),
                    },
                )
            })
            .collect();
        Self { grants }
    }

    /// The production role table.
    pub fn standard() -> Self {
        Self::new([
            (
                ROLE_MARKETING,
                vec![PERM_PROPOSAL_SUBMIT],
                vec!["sales", "proposals"],
            ),
            (
                ROLE_PPIC,
                vec![PERM_PROPOSAL_PRICE_REVIEW, PERM_PROPOSAL_DEADLINE_REVIEW],
                vec!["production", "proposals"],
            ),
            (
                ROLE_FINANCE,
                vec![PERM_PROPOSAL_FINANCE_DECIDE, PERM_PAYROLL_MANAGE],
                vec!["finance", "proposals", "payroll"],
            ),
            (
                ROLE_HR,
                vec![
                    PERM_PAYROLL_MANAGE,
                    PERM_REQUEST_APPROVE,
                    PERM_CHANGE_REQUEST_APPROVE,
                ],
                vec!["hr", "payroll", "attendance"],
            ),
            (
                ROLE_DIRECTOR,
                vec![
                    PERM_PROPOSAL_FINANCE_DECIDE,
                    PERM_PAYROLL_MANAGE,
                    PERM_REQUEST_APPROVE,
                    PERM_CHANGE_REQUEST_APPROVE,
                ],
                vec!["sales", "finance", "hr", "production", "payroll"],
            ),
        ])
    }

    /// Permissions granted to `role`. Unknown roles resolve to an empty slice.
    pub fn permissions_for(&self, role: &str) -> &[String] {
        self.grants
            .get(role)
            .map(|g| g.permissions.as_slice())
            .unwrap_or(&[])
    }

    /// Dashboard modules visible to `role`. Unknown roles resolve to empty.
    pub fn modules_for(&self, role: &str) -> &[String] {
        self.grants
            .get(role)
            .map(|g| g.modules.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `role` holds `permission`.
    pub fn is_allowed(&self, role: &str, permission: &str) -> bool {
        self.permissions_for(role).iter().any(|p| p == permission)
    }

    /// Full grant for `role`, if the role is known.
    pub fn grant_for(&self, role: &str) -> Option<&RoleGrant> {
        self.grants.get(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_grants() {
        let config = RoleConfig::standard();
        assert!(config.is_allowed(ROLE_MARKETING, PERM_PROPOSAL_SUBMIT));
        assert!(config.is_allowed(ROLE_PPIC, PERM_PROPOSAL_DEADLINE_REVIEW));
        assert!(config.is_allowed(ROLE_FINANCE, PERM_PROPOSAL_FINANCE_DECIDE));
        assert!(config.is_allowed(ROLE_HR, PERM_REQUEST_APPROVE));
    }

    #[test]
    fn test_roles_do_not_cross_grant() {
        let config = RoleConfig::standard();
        assert!(!config.is_allowed(ROLE_MARKETING, PERM_PROPOSAL_FINANCE_DECIDE));
        assert!(!config.is_allowed(ROLE_PPIC, PERM_PAYROLL_MANAGE));
        assert!(!config.is_allowed(ROLE_FINANCE, PERM_PROPOSAL_SUBMIT));
    }

    #[test]
    fn test_unknown_role_resolves_to_nothing() {
        let config = RoleConfig::standard();
        assert!(config.permissions_for("intern").is_empty());
        assert!(config.modules_for("intern").is_empty());
        assert!(!config.is_allowed("intern", PERM_PROPOSAL_SUBMIT));
        assert!(config.grant_for("intern").is_none());
    }

    #[test]
    fn test_synthetic_table_injection() {
        let config = RoleConfig::new([("tester", vec!["widget:poke"], vec!["lab"])]);
        assert!(config.is_allowed("tester", "widget:poke"));
        assert_eq!(config.modules_for("tester"), ["lab"]);
        // The synthetic table knows nothing about production roles.
        assert!(!config.is_allowed(ROLE_HR, PERM_REQUEST_APPROVE));
    }
}
