//! Employee data change-request field registry.
//!
//! A change request targets exactly one typed field, expressed as a tagged
//! variant per change type instead of a free-form field-name string. Every
//! valid (change type, field) combination is enumerable, and each variant
//! dispatches to a fixed employee column, so there is no dynamic
//! attribute-by-name write anywhere in the approval path.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Request status constants
// ---------------------------------------------------------------------------

/// Awaiting HR review.
pub const CHANGE_PENDING: &str = "pending";
/// Approved and applied to the employee record.
pub const CHANGE_APPROVED: &str = "approved";
/// Rejected; employee data untouched.
pub const CHANGE_REJECTED: &str = "rejected";

/// All valid change-request statuses.
pub const VALID_CHANGE_STATUSES: &[&str] = &[CHANGE_PENDING, CHANGE_APPROVED, CHANGE_REJECTED];

/// Identity-card (KTP) fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KtpField {
    Number,
    FullName,
    Address,
}

/// Contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Phone,
    Email,
    EmergencyPhone,
}

/// Tax registration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxField {
    NpwpNumber,
    TaxStatus,
}

/// Salary account fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankField {
    BankName,
    AccountNumber,
    AccountHolder,
}

/// One typed, changeable employee field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeField {
    Ktp(KtpField),
    Contact(ContactField),
    Tax(TaxField),
    Bank(BankField),
}

/// Every valid field, in registry order. The approval path and the tests
/// both iterate this list, so a new variant cannot be added without showing
/// up in both.
pub const ALL_CHANGE_FIELDS: &[ChangeField] = &[
    ChangeField::Ktp(KtpField::Number),
    ChangeField::Ktp(KtpField::FullName),
    ChangeField::Ktp(KtpField::Address),
    ChangeField::Contact(ContactField::Phone),
    ChangeField::Contact(ContactField::Email),
    ChangeField::Contact(ContactField::EmergencyPhone),
    ChangeField::Tax(TaxField::NpwpNumber),
    ChangeField::Tax(TaxField::TaxStatus),
    ChangeField::Bank(BankField::BankName),
    ChangeField::Bank(BankField::AccountNumber),
    ChangeField::Bank(BankField::AccountHolder),
];

impl ChangeField {
    /// The change-type tag stored in the database.
    pub fn change_type(&self) -> &'static str {
        match self {
            Self::Ktp(_) => "ktp",
            Self::Contact(_) => "contact",
            Self::Tax(_) => "tax",
            Self::Bank(_) => "bank",
        }
    }

    /// The field tag stored in the database.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Ktp(KtpField::Number) => "ktp_number",
            Self::Ktp(KtpField::FullName) => "full_name",
            Self::Ktp(KtpField::Address) => "address",
            Self::Contact(ContactField::Phone) => "phone",
            Self::Contact(ContactField::Email) => "email",
            Self::Contact(ContactField::EmergencyPhone) => "emergency_phone",
            Self::Tax(TaxField::NpwpNumber) => "npwp_number",
            Self::Tax(TaxField::TaxStatus) => "tax_status",
            Self::Bank(BankField::BankName) => "bank_name",
            Self::Bank(BankField::AccountNumber) => "bank_account_number",
            Self::Bank(BankField::AccountHolder) => "bank_account_holder",
        }
    }

    /// The employee-table column the approved value is written to. This is
    /// the explicit dispatch table: one fixed column per variant.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Ktp(KtpField::Number) => "ktp_number",
            Self::Ktp(KtpField::FullName) => "full_name",
            Self::Ktp(KtpField::Address) => "address",
            Self::Contact(ContactField::Phone) => "phone",
            Self::Contact(ContactField::Email) => "email",
            Self::Contact(ContactField::EmergencyPhone) => "emergency_phone",
            Self::Tax(TaxField::NpwpNumber) => "npwp_number",
            Self::Tax(TaxField::TaxStatus) => "tax_status",
            Self::Bank(BankField::BankName) => "bank_name",
            Self::Bank(BankField::AccountNumber) => "bank_account_number",
            Self::Bank(BankField::AccountHolder) => "bank_account_holder",
        }
    }

    /// Parse a (change type, field) pair, rejecting unknown combinations.
    pub fn parse(change_type: &str, field_name: &str) -> Result<Self, CoreError> {
        ALL_CHANGE_FIELDS
            .iter()
            .copied()
            .find(|f| f.change_type() == change_type && f.field_name() == field_name)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown change field '{field_name}' for change type '{change_type}'"
                ))
            })
    }
}

/// Reject empty replacement values before a request is stored.
pub fn validate_new_value(value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(
            "new_value must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_every_field_round_trips_through_parse() {
        for field in ALL_CHANGE_FIELDS {
            let parsed = ChangeField::parse(field.change_type(), field.field_name()).unwrap();
            assert_eq!(parsed, *field);
        }
    }

    #[test]
    fn test_unknown_combinations_rejected() {
        assert_matches!(
            ChangeField::parse("ktp", "phone"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            ChangeField::parse("salary", "amount"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(ChangeField::parse("", ""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_dispatch_columns_are_unique() {
        let mut columns: Vec<_> = ALL_CHANGE_FIELDS.iter().map(|f| f.column()).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), ALL_CHANGE_FIELDS.len());
    }

    #[test]
    fn test_change_types_group_their_fields() {
        for field in ALL_CHANGE_FIELDS {
            let expected = match field {
                ChangeField::Ktp(_) => "ktp",
                ChangeField::Contact(_) => "contact",
                ChangeField::Tax(_) => "tax",
                ChangeField::Bank(_) => "bank",
            };
            assert_eq!(field.change_type(), expected);
        }
    }

    #[test]
    fn test_new_value_must_be_non_empty() {
        assert!(validate_new_value("081234567890").is_ok());
        assert_matches!(validate_new_value("  "), Err(CoreError::Validation(_)));
    }
}
