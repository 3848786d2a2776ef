//! Session identity service.
//!
//! [`SessionManager`] owns the signed-in [`Identity`]. It is the only writer
//! of the in-memory session and of the persisted session record; callers get
//! clones.
//!
//! # States
//!
//! ```text
//! Unauthenticated --sign_in/sign_up--> Authenticating --ok--> Authenticated
//!                                            |
//!                                            +--error--> (previous state)
//! Authenticated --sign_out--> Unauthenticated
//! ```
//!
//! Each sign-in or sign-up is an attempt with a generation number. Starting
//! a new attempt, or signing out, bumps the generation; an older attempt
//! that finishes afterwards reports [`AuthError::Superseded`] and leaves the
//! session alone. An attempt whose [`CancelToken`] fires reports
//! [`AuthError::Cancelled`], also without touching the session.

mod error;
mod roles;

pub use error::AuthError;
pub use roles::{FixedRole, RandomRole, RoleAssignment};

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use farmerty_core::{Email, Role, UserId};

use crate::models::Identity;
use crate::navigation::Route;
use crate::services::Outcome;
use crate::services::scope::{CancelToken, simulate_latency};
use crate::storage::session::SessionRepository;
use crate::storage::{LocalStorage, StorageError};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    /// A sign-in or sign-up is in flight. `previous` is the identity that
    /// stays active if it fails.
    Authenticating { previous: Option<Identity> },
    Authenticated(Identity),
}

impl SessionState {
    /// The identity callers should treat as signed in.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Authenticating { previous } => previous.as_ref(),
            Self::Unauthenticated => None,
        }
    }

    fn settled(previous: Option<Identity>) -> Self {
        previous.map_or(Self::Unauthenticated, Self::Authenticated)
    }
}

/// Simulated round-trip time of authentication requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthLatency {
    pub sign_in: Duration,
    pub sign_up: Duration,
}

impl AuthLatency {
    /// No delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            sign_in: Duration::ZERO,
            sign_up: Duration::ZERO,
        }
    }
}

impl Default for AuthLatency {
    fn default() -> Self {
        Self {
            sign_in: Duration::from_millis(800),
            sign_up: Duration::from_millis(1000),
        }
    }
}

struct Inner {
    state: SessionState,
    generation: u64,
}

/// Owner of the current session.
pub struct SessionManager {
    storage: Arc<dyn LocalStorage>,
    roles: Box<dyn RoleAssignment>,
    latency: AuthLatency,
    inner: RwLock<Inner>,
}

impl SessionManager {
    /// Create a manager with no active session.
    ///
    /// Call [`SessionManager::restore`] to pick up a persisted session.
    #[must_use]
    pub fn new(
        storage: Arc<dyn LocalStorage>,
        roles: Box<dyn RoleAssignment>,
        latency: AuthLatency,
    ) -> Self {
        Self {
            storage,
            roles,
            latency,
            inner: RwLock::new(Inner {
                state: SessionState::Unauthenticated,
                generation: 0,
            }),
        }
    }

    /// Load the persisted session, if there is a valid one.
    ///
    /// A record that fails validation is discarded and removed from storage;
    /// the manager then stays signed out.
    #[instrument(skip(self))]
    pub fn restore(&self) -> Option<Identity> {
        let repo = SessionRepository::new(self.storage.as_ref());

        match repo.load() {
            Ok(Some(identity)) => {
                tracing::info!(user_id = %identity.id(), role = %identity.role(), "Restored session");
                self.write().state = SessionState::Authenticated(identity.clone());
                Some(identity)
            }
            Ok(None) => None,
            Err(StorageError::DataCorruption(reason)) => {
                tracing::warn!(%reason, "Discarding malformed session record");
                if let Err(e) = repo.clear() {
                    tracing::error!(error = %e, "Failed to remove malformed session record");
                }
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read persisted session");
                None
            }
        }
    }

    /// Snapshot of the session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.state().identity().cloned()
    }

    /// Whether an authentication request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state(), SessionState::Authenticating { .. })
    }

    /// Sign in with an email and password.
    ///
    /// There is no credential store: any well-formed email with a password
    /// of at least [`MIN_PASSWORD_LENGTH`] characters is accepted, and the
    /// role comes from the configured [`RoleAssignment`].
    ///
    /// # Errors
    ///
    /// - `AuthError::Validation` if the email or password is empty, or the
    ///   email is malformed
    /// - `AuthError::InvalidCredentials` if the password is too short
    /// - `AuthError::Cancelled` / `AuthError::Superseded` if the attempt was
    ///   abandoned or replaced
    /// - `AuthError::Storage` if the session cannot be persisted
    #[instrument(skip(self, password, token), fields(email = %email))]
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
        token: &CancelToken,
    ) -> Result<Outcome<Identity>, AuthError> {
        let generation = self.begin();

        let attempt = async {
            simulate_latency(self.latency.sign_in, token).await?;
            let email = validate_sign_in(email, password.expose_secret())?;
            let role = self.roles.assign(&email);
            let name = email.local_part().to_owned();
            Identity::new(UserId::generate(), email, name, role)
                .map_err(|e| AuthError::field("email", e.to_string()))
        };

        let identity = match attempt.await {
            Ok(identity) => identity,
            Err(e) => return Err(self.fail(generation, e)),
        };

        self.complete(generation, &identity)?;
        tracing::info!(user_id = %identity.id(), role = %identity.role(), "Signed in");

        let notice = format!("Welcome back, {}!", identity.name());
        Ok(Outcome::new(identity, notice, Route::Home))
    }

    /// Create an account and sign in as it.
    ///
    /// # Errors
    ///
    /// - `AuthError::Validation` citing the first empty field (name, email,
    ///   password), a password shorter than [`MIN_PASSWORD_LENGTH`], or a
    ///   malformed email
    /// - `AuthError::Cancelled` / `AuthError::Superseded` if the attempt was
    ///   abandoned or replaced
    /// - `AuthError::Storage` if the session cannot be persisted
    #[instrument(skip(self, name, password, token), fields(email = %email, role = %role))]
    pub async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
        role: Role,
        token: &CancelToken,
    ) -> Result<Outcome<Identity>, AuthError> {
        let generation = self.begin();

        let attempt = async {
            simulate_latency(self.latency.sign_up, token).await?;
            let (name, email) = validate_sign_up(name, email, password.expose_secret())?;
            Identity::new(UserId::generate(), email, name, role)
                .map_err(|e| AuthError::field("name", e.to_string()))
        };

        let identity = match attempt.await {
            Ok(identity) => identity,
            Err(e) => return Err(self.fail(generation, e)),
        };

        self.complete(generation, &identity)?;
        tracing::info!(user_id = %identity.id(), role = %identity.role(), "Account created");

        Ok(Outcome::new(
            identity,
            "Account created successfully!",
            Route::Home,
        ))
    }

    /// Sign out, from any state.
    ///
    /// Any in-flight attempt is superseded. A failure to remove the
    /// persisted record is logged; the in-memory session is cleared
    /// regardless.
    #[instrument(skip(self))]
    pub fn sign_out(&self) -> Outcome<()> {
        let mut inner = self.write();
        inner.generation += 1;
        inner.state = SessionState::Unauthenticated;

        if let Err(e) = SessionRepository::new(self.storage.as_ref()).clear() {
            tracing::error!(error = %e, "Failed to clear persisted session");
        }
        drop(inner);

        tracing::info!("Signed out");
        Outcome::new((), "You have been signed out", Route::Home)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enter `Authenticating` and return the new attempt's generation.
    fn begin(&self) -> u64 {
        let mut inner = self.write();
        inner.generation += 1;
        let previous = inner.state.identity().cloned();
        inner.state = SessionState::Authenticating { previous };
        inner.generation
    }

    /// Settle a failed attempt back to the state it started from, unless a
    /// newer attempt owns the session by now.
    fn fail(&self, generation: u64, error: AuthError) -> AuthError {
        let mut inner = self.write();
        if inner.generation == generation {
            let previous = inner.state.identity().cloned();
            inner.state = SessionState::settled(previous);
        }
        drop(inner);

        tracing::debug!(error = %error, "Authentication attempt failed");
        error
    }

    /// Persist and activate `identity` if the attempt is still current.
    fn complete(&self, generation: u64, identity: &Identity) -> Result<(), AuthError> {
        let mut inner = self.write();
        if inner.generation != generation {
            tracing::debug!("Authentication attempt superseded");
            return Err(AuthError::Superseded);
        }

        if let Err(e) = SessionRepository::new(self.storage.as_ref()).save(identity) {
            let previous = inner.state.identity().cloned();
            inner.state = SessionState::settled(previous);
            tracing::error!(error = %e, "Failed to persist session");
            return Err(e.into());
        }

        inner.state = SessionState::Authenticated(identity.clone());
        Ok(())
    }
}

fn invalid_email() -> AuthError {
    AuthError::field("email", "Please enter a valid email address")
}

/// Check sign-in input. Empty fields are validation errors; a short
/// password is a credential error.
fn validate_sign_in(email: &str, password: &str) -> Result<Email, AuthError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::field("email", "Email is required"));
    }
    if password.is_empty() {
        return Err(AuthError::field("password", "Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::InvalidCredentials);
    }
    Email::parse(email).map_err(|_| invalid_email())
}

/// Check sign-up input, citing the first offending field.
fn validate_sign_up(name: &str, email: &str, password: &str) -> Result<(String, Email), AuthError> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err(AuthError::field("name", "Name is required"));
    }
    if email.is_empty() {
        return Err(AuthError::field("email", "Email is required"));
    }
    if password.is_empty() {
        return Err(AuthError::field("password", "Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::field(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }
    let email = Email::parse(email).map_err(|_| invalid_email())?;
    Ok((name.to_owned(), email))
}
