//! Principal roles and their legal transitions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trust level of a principal.
///
/// Every account starts as `Guest`. The only way up to `Contributor` is a
/// successful OTP email verification; `Admin` is granted out of band. Any
/// role can be demoted back to `Guest`, but only through an explicit call,
/// never as a side effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Guest,
    Contributor,
    Admin,
}

/// Error type for parsing Role from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl std::fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guest" => Ok(Role::Guest),
            "contributor" => Ok(Role::Contributor),
            "admin" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Contributor => "contributor",
            Role::Admin => "admin",
        }
    }

    /// Check if this role has at least the permissions of another role
    pub fn includes(&self, other: &Role) -> bool {
        match self {
            Role::Admin => true,
            Role::Contributor => matches!(other, Role::Contributor | Role::Guest),
            Role::Guest => matches!(other, Role::Guest),
        }
    }

    /// Whether moderation actions (report review, document verification)
    /// are permitted for this role.
    pub fn can_moderate(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_includes_admin() {
        assert!(Role::Admin.includes(&Role::Admin));
        assert!(Role::Admin.includes(&Role::Contributor));
        assert!(Role::Admin.includes(&Role::Guest));
    }

    #[test]
    fn test_role_includes_contributor() {
        assert!(!Role::Contributor.includes(&Role::Admin));
        assert!(Role::Contributor.includes(&Role::Contributor));
        assert!(Role::Contributor.includes(&Role::Guest));
    }

    #[test]
    fn test_role_includes_guest() {
        assert!(!Role::Guest.includes(&Role::Admin));
        assert!(!Role::Guest.includes(&Role::Contributor));
        assert!(Role::Guest.includes(&Role::Guest));
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("guest".parse::<Role>().unwrap(), Role::Guest);
        assert_eq!("contributor".parse::<Role>().unwrap(), Role::Contributor);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_role_parse_invalid() {
        assert!("invalid".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err()); // Case sensitive
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Guest, Role::Contributor, Role::Admin] {
            let s = role.as_str();
            let parsed: Role = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_only_admin_moderates() {
        assert!(Role::Admin.can_moderate());
        assert!(!Role::Contributor.can_moderate());
        assert!(!Role::Guest.can_moderate());
    }

    #[test]
    fn test_parse_role_error_display() {
        let err = ParseRoleError("unknown".to_string());
        assert!(err.to_string().contains("unknown"));
    }
}
