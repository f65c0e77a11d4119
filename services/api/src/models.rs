//! API models for entities and request/response payloads

pub mod employee;
pub mod role;

pub use employee::{
    AssignRolesRequest, Employee, EmployeeStatus, NewEmployee, UpdateEmployee, UpdateStatusRequest,
};
pub use role::{NewRole, Role, RoleName, UpdateRole};
