//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `FARMERTY_STORAGE_PATH` - Local storage file (default: .farmerty/storage.json)
//! - `FARMERTY_SIGN_IN_DELAY_MS` - Simulated sign-in latency (default: 800)
//! - `FARMERTY_SIGN_UP_DELAY_MS` - Simulated sign-up latency (default: 1000)
//! - `FARMERTY_ADD_PRODUCT_DELAY_MS` - Simulated submission latency (default: 1000)
//! - `FARMERTY_SIGN_IN_ROLE` - Role given on sign-in: `random`, `farmer` or
//!   `consumer` (default: random)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use farmerty_core::Role;

use crate::services::auth::{AuthLatency, FixedRole, RandomRole, RoleAssignment};
use crate::services::products::DEFAULT_ADD_PRODUCT_LATENCY;

const DEFAULT_STORAGE_PATH: &str = ".farmerty/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How sign-in picks the new identity's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInRole {
    /// Coin flip per sign-in.
    #[default]
    Random,
    /// Always the given role.
    Fixed(Role),
}

impl SignInRole {
    /// The policy implementing this setting.
    #[must_use]
    pub fn policy(self) -> Box<dyn RoleAssignment> {
        match self {
            Self::Random => Box::new(RandomRole),
            Self::Fixed(role) => Box::new(FixedRole(role)),
        }
    }
}

impl std::str::FromStr for SignInRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("random") {
            return Ok(Self::Random);
        }
        s.parse::<Role>()
            .map(Self::Fixed)
            .map_err(|e| e.to_string())
    }
}

/// Simulated request latencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub sign_in: Duration,
    pub sign_up: Duration,
    pub add_product: Duration,
}

impl LatencyConfig {
    /// No simulated latency anywhere.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            sign_in: Duration::ZERO,
            sign_up: Duration::ZERO,
            add_product: Duration::ZERO,
        }
    }

    /// The subset used by the session manager.
    #[must_use]
    pub const fn auth(&self) -> AuthLatency {
        AuthLatency {
            sign_in: self.sign_in,
            sign_up: self.sign_up,
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        let auth = AuthLatency::default();
        Self {
            sign_in: auth.sign_in,
            sign_up: auth.sign_up,
            add_product: DEFAULT_ADD_PRODUCT_LATENCY,
        }
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// File backing local storage
    pub storage_path: PathBuf,
    /// Simulated request latencies
    pub latency: LatencyConfig,
    /// Role policy for sign-in
    pub sign_in_role: SignInRole,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            latency: LatencyConfig::default(),
            sign_in_role: SignInRole::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_path = lookup("FARMERTY_STORAGE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or(defaults.storage_path, PathBuf::from);

        let latency = LatencyConfig {
            sign_in: get_millis(&lookup, "FARMERTY_SIGN_IN_DELAY_MS", defaults.latency.sign_in)?,
            sign_up: get_millis(&lookup, "FARMERTY_SIGN_UP_DELAY_MS", defaults.latency.sign_up)?,
            add_product: get_millis(
                &lookup,
                "FARMERTY_ADD_PRODUCT_DELAY_MS",
                defaults.latency.add_product,
            )?,
        };

        let sign_in_role = match lookup("FARMERTY_SIGN_IN_ROLE") {
            Some(value) => value.parse::<SignInRole>().map_err(|e| {
                ConfigError::InvalidEnvVar("FARMERTY_SIGN_IN_ROLE".to_string(), e)
            })?,
            None => defaults.sign_in_role,
        };

        Ok(Self {
            storage_path,
            latency,
            sign_in_role,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Read a millisecond duration, falling back to `default` when unset.
fn get_millis(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
