//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Guarded status transitions run
//! inside a single transaction with the target row locked (`SELECT ... FOR
//! UPDATE`), so a guard failure rolls back with no partial writes.

pub mod attendance_repo;
pub mod change_request_repo;
pub mod employee_repo;
pub mod payroll_repo;
pub mod proposal_repo;
pub mod request_repo;

pub use attendance_repo::AttendanceRepo;
pub use change_request_repo::ChangeRequestRepo;
pub use employee_repo::EmployeeRepo;
pub use payroll_repo::PayrollRepo;
pub use proposal_repo::ProposalRepo;
pub use request_repo::RequestRepo;
