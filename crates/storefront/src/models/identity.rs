//! Signed-in identity.

use serde::{Deserialize, Serialize};

use farmerty_core::{Email, EmailError, Role, RoleError, UserId};

/// Reasons an identity record is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The record has an empty id.
    #[error("identity id cannot be empty")]
    MissingId,

    /// The email is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The display name is empty.
    #[error("identity name cannot be empty")]
    MissingName,

    /// The role is not one of the known roles.
    #[error(transparent)]
    InvalidRole(#[from] RoleError),
}

/// The authenticated user's profile for the current session.
///
/// Only the session manager creates and replaces identities; everyone else
/// sees clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IdentityRecord")]
pub struct Identity {
    id: UserId,
    email: Email,
    name: String,
    role: Role,
}

impl Identity {
    /// Build an identity.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if the id or name is blank.
    pub fn new(
        id: UserId,
        email: Email,
        name: impl Into<String>,
        role: Role,
    ) -> Result<Self, IdentityError> {
        let name = name.into();
        if id.is_empty() {
            return Err(IdentityError::MissingId);
        }
        if name.trim().is_empty() {
            return Err(IdentityError::MissingName);
        }
        Ok(Self {
            id,
            email,
            name,
            role,
        })
    }

    /// Opaque user id.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Email address the user signed in with.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marketplace role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether this identity may list products.
    #[must_use]
    pub const fn is_farmer(&self) -> bool {
        self.role.can_list_products()
    }
}

/// Unvalidated shape of a persisted identity.
#[derive(Deserialize)]
struct IdentityRecord {
    id: String,
    email: String,
    name: String,
    role: String,
}

impl TryFrom<IdentityRecord> for Identity {
    type Error = IdentityError;

    fn try_from(record: IdentityRecord) -> Result<Self, Self::Error> {
        let email = Email::parse(&record.email)?;
        let role = record.role.parse::<Role>()?;
        Self::new(UserId::new(record.id), email, record.name, role)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new(
            UserId::new("k3j2h4g5f6d7s"),
            Email::parse("grower@greenvalley.farm").unwrap(),
            "grower",
            Role::Farmer,
        )
        .unwrap()
    }

    #[test]
    fn test_persisted_shape() {
        let json = serde_json::to_value(identity()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "k3j2h4g5f6d7s",
                "email": "grower@greenvalley.farm",
                "name": "grower",
                "role": "farmer",
            })
        );
    }

    #[test]
    fn test_deserialize_valid_record() {
        let parsed: Identity = serde_json::from_str(
            r#"{"id":"abc","email":"a@b.com","name":"Ann","role":"consumer"}"#,
        )
        .unwrap();
        assert_eq!(parsed.name(), "Ann");
        assert_eq!(parsed.role(), Role::Consumer);
    }

    #[test]
    fn test_deserialize_rejects_malformed_records() {
        let bad = [
            r#"{"id":"","email":"a@b.com","name":"Ann","role":"consumer"}"#,
            r#"{"id":"abc","email":"nope","name":"Ann","role":"consumer"}"#,
            r#"{"id":"abc","email":"a@b.com","name":"  ","role":"consumer"}"#,
            r#"{"id":"abc","email":"a@b.com","name":"Ann","role":"admin"}"#,
            r#"{"id":"abc","email":"a@b.com","role":"consumer"}"#,
            r#"["abc"]"#,
        ];
        for record in bad {
            assert!(
                serde_json::from_str::<Identity>(record).is_err(),
                "accepted {record}"
            );
        }
    }

    #[test]
    fn test_new_rejects_blank_name() {
        let result = Identity::new(
            UserId::new("abc"),
            Email::parse("a@b.com").unwrap(),
            "",
            Role::Consumer,
        );
        assert_eq!(result, Err(IdentityError::MissingName));
    }
}
