//! Role assignment for sign-in.
//!
//! Sign-in has no credential store to look a role up in, so the role comes
//! from a pluggable policy. The default mirrors the mock marketplace and
//! picks a role at random; deployments and tests pin it with [`FixedRole`].

use rand::Rng;

use farmerty_core::{Email, Role};

/// Chooses the role for an identity created by sign-in.
pub trait RoleAssignment: Send + Sync {
    /// Role for the user signing in as `email`.
    fn assign(&self, email: &Email) -> Role;
}

/// Assigns farmer or consumer with equal probability.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomRole;

impl RoleAssignment for RandomRole {
    fn assign(&self, _email: &Email) -> Role {
        if rand::rng().random_bool(0.5) {
            Role::Farmer
        } else {
            Role::Consumer
        }
    }
}

/// Always assigns the same role.
#[derive(Debug, Clone, Copy)]
pub struct FixedRole(pub Role);

impl RoleAssignment for FixedRole {
    fn assign(&self, _email: &Email) -> Role {
        self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_role() {
        let email = Email::parse("a@b.com").unwrap();
        assert_eq!(FixedRole(Role::Farmer).assign(&email), Role::Farmer);
    }

    #[test]
    fn test_random_role_is_a_known_role() {
        let email = Email::parse("a@b.com").unwrap();
        for _ in 0..32 {
            assert!(Role::ALL.contains(&RandomRole.assign(&email)));
        }
    }
}
