//! Role model and related functionality

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of job roles an employee can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    Manager,
    Developer,
    Designer,
    ScrumMaster,
}

impl RoleName {
    /// The wire/database representation of this role name
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Manager => "manager",
            RoleName::Developer => "developer",
            RoleName::Designer => "designer",
            RoleName::ScrumMaster => "scrum_master",
        }
    }
}

impl FromStr for RoleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(RoleName::Manager),
            "developer" => Ok(RoleName::Developer),
            "designer" => Ok(RoleName::Designer),
            "scrum_master" => Ok(RoleName::ScrumMaster),
            other => Err(format!(
                "\"{}\" is not a valid role name (expected one of: manager, developer, designer, scrum_master)",
                other
            )),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: RoleName,
}

/// New role creation payload
///
/// The name arrives as a free-form string so that an invalid value can be
/// reported as a field-level validation error rather than a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRole {
    pub name: String,
}

/// Role partial-update payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRole {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_round_trip() {
        for name in [
            RoleName::Manager,
            RoleName::Developer,
            RoleName::Designer,
            RoleName::ScrumMaster,
        ] {
            assert_eq!(name.as_str().parse::<RoleName>().unwrap(), name);
        }
    }

    #[test]
    fn test_role_name_rejects_unknown_values() {
        assert!("architect".parse::<RoleName>().is_err());
        assert!("Manager".parse::<RoleName>().is_err());
        assert!("".parse::<RoleName>().is_err());
    }

    #[test]
    fn test_role_name_serializes_snake_case() {
        let json = serde_json::to_string(&RoleName::ScrumMaster).unwrap();
        assert_eq!(json, "\"scrum_master\"");

        let parsed: RoleName = serde_json::from_str("\"developer\"").unwrap();
        assert_eq!(parsed, RoleName::Developer);
    }

    #[test]
    fn test_role_wire_shape() {
        let role = Role {
            id: 7,
            name: RoleName::Designer,
        };
        let value = serde_json::to_value(&role).unwrap();
        assert_eq!(value, serde_json::json!({"id": 7, "name": "designer"}));
    }
}
