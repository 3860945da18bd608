//! HR module: employee records held in memory and persisted as a whole
//! collection after every successful mutation.

mod employee;
mod error;
mod service;

pub use employee::{Employee, EmployeeId, EmployeeUpdate, NewEmployee, SortField, today};
pub use error::{HrError, HrResult};
pub use service::{EmployeeService, MIN_NAME_CHARS};
