//! Domain logic for the Kencana ERP backend.
//!
//! Pure, storage-free modules: status enums and transition guards for the
//! product pricing/deadline approval workflow, payroll attendance
//! reconciliation arithmetic, role/permission resolution, and the employee
//! data change-request field registry. All I/O lives in `kencana-db` and
//! `kencana-api`.

pub mod attendance;
pub mod change_request;
pub mod error;
pub mod payroll;
pub mod proposal;
pub mod roles;
pub mod types;
