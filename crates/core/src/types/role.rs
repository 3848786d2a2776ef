//! Marketplace roles.

use serde::{Deserialize, Serialize};

/// Error returned when a role name is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0} (expected farmer or consumer)")]
pub struct RoleError(pub String);

/// The role an identity acts under.
///
/// Farmers list products; consumers browse and buy them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Farmer,
    #[default]
    Consumer,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 2] = [Self::Farmer, Self::Consumer];

    /// The persisted name of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Consumer => "consumer",
        }
    }

    /// Whether this role may submit products.
    #[must_use]
    pub const fn can_list_products(self) -> bool {
        matches!(self, Self::Farmer)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farmer" => Ok(Self::Farmer),
            "consumer" => Ok(Self::Consumer),
            _ => Err(RoleError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("farmer".parse::<Role>().unwrap(), Role::Farmer);
        assert_eq!(" Consumer ".parse::<Role>().unwrap(), Role::Consumer);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Role::Farmer).unwrap(), "\"farmer\"");
        assert!(serde_json::from_str::<Role>("\"grower\"").is_err());
    }

    #[test]
    fn test_only_farmers_list_products() {
        assert!(Role::Farmer.can_list_products());
        assert!(!Role::Consumer.can_list_products());
    }
}
