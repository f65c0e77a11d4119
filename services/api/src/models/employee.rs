//! Employee model and related functionality

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::role::Role;

/// Employment status of an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Employed,
    Fired,
}

impl EmployeeStatus {
    /// The wire/database representation of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Employed => "employed",
            EmployeeStatus::Fired => "fired",
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employed" => Ok(EmployeeStatus::Employed),
            "fired" => Ok(EmployeeStatus::Fired),
            other => Err(format!(
                "\"{}\" is not a valid status (expected \"employed\" or \"fired\")",
                other
            )),
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee entity with its role set expanded
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub hire_date: NaiveDate,
    pub status: EmployeeStatus,
    pub roles: Vec<Role>,
}

/// New employee creation payload, also used for full updates
///
/// `status` arrives as a free-form string so that an invalid value can be
/// reported as a field-level validation error; it defaults to `employed`
/// when omitted. `role_ids` left out means an empty role set on create and
/// an unchanged role set on full update.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub hire_date: NaiveDate,
    pub status: Option<String>,
    pub role_ids: Option<Vec<i64>>,
}

/// Employee partial-update payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub role_ids: Option<Vec<i64>>,
}

/// Request body for the role-assignment endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AssignRolesRequest {
    #[serde(default)]
    pub role_ids: Vec<i64>,
}

/// Request body for the status-update endpoint
///
/// A missing `status` is treated as `true` (employed). The dashboard client
/// relies on this default, so it is kept even though an explicit field would
/// be stricter.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_status_round_trip() {
        for status in [EmployeeStatus::Employed, EmployeeStatus::Fired] {
            assert_eq!(status.as_str().parse::<EmployeeStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_employee_status_rejects_unknown_values() {
        assert!("retired".parse::<EmployeeStatus>().is_err());
        assert!("Employed".parse::<EmployeeStatus>().is_err());
    }

    #[test]
    fn test_new_employee_optional_fields_default() {
        let payload: NewEmployee = serde_json::from_str(
            r#"{
                "first_name": "John",
                "last_name": "Smith",
                "email": "john.smith@example.com",
                "phone_number": "0123456789",
                "hire_date": "2024-03-01"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.hire_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(payload.status.is_none());
        assert!(payload.role_ids.is_none());
    }

    #[test]
    fn test_assign_roles_request_defaults_to_empty() {
        let payload: AssignRolesRequest = serde_json::from_str("{}").unwrap();
        assert!(payload.role_ids.is_empty());

        let payload: AssignRolesRequest =
            serde_json::from_str(r#"{"role_ids": [1, 2]}"#).unwrap();
        assert_eq!(payload.role_ids, vec![1, 2]);
    }

    #[test]
    fn test_update_status_request_missing_field() {
        let payload: UpdateStatusRequest = serde_json::from_str("{}").unwrap();
        assert!(payload.status.is_none());

        let payload: UpdateStatusRequest =
            serde_json::from_str(r#"{"status": false}"#).unwrap();
        assert_eq!(payload.status, Some(false));
    }

    #[test]
    fn test_employee_wire_shape_includes_expanded_roles() {
        use crate::models::role::RoleName;

        let employee = Employee {
            id: 1,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            phone_number: "0123456789".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
            status: EmployeeStatus::Employed,
            roles: vec![Role {
                id: 2,
                name: RoleName::Developer,
            }],
        };

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["status"], "employed");
        assert_eq!(value["hire_date"], "2023-06-15");
        assert_eq!(
            value["roles"],
            serde_json::json!([{"id": 2, "name": "developer"}])
        );
    }
}
