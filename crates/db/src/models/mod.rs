pub mod attendance;
pub mod change_request;
pub mod employee;
pub mod payroll;
pub mod proposal;
pub mod request;
