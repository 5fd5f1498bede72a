//! Tracker configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `EWASTE_DATA_DIR` - Directory for file storage (default: `.ewaste`)
//! - `EWASTE_STORAGE` - `file` or `memory` (default: `file`)
//! - `EWASTE_SEED` - Seed demonstration records into empty stores (default: `true`)
//! - `EWASTE_ADMIN_EMAIL` - Built-in administrator email (default: `admin@example.com`)
//! - `EWASTE_ADMIN_PASSWORD` - Built-in administrator password (default: `password`)

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use ewaste_core::{Email, Role, UserId};

use crate::models::RosterEntry;
use crate::models::user::ADMIN_USER_ID;

const DEFAULT_DATA_DIR: &str = ".ewaste";
const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const DEFAULT_ADMIN_PASSWORD: &str = "password";
const DEFAULT_ADMIN_NAME: &str = "Admin User";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where stores persist their state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// One JSON file per key under the data directory.
    #[default]
    File,
    /// Process memory only; nothing survives exit.
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(format!("expected 'file' or 'memory', got '{s}'")),
        }
    }
}

/// Tracker application configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Directory backing [`StorageBackend::File`]
    pub data_dir: PathBuf,
    /// Storage backend
    pub storage: StorageBackend,
    /// Whether empty stores start from demonstration records
    pub seed: bool,
    /// Built-in administrator account
    pub admin: AdminConfig,
}

/// Built-in administrator credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    pub email: Email,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
    /// Roster entry seeded into an empty roster.
    #[must_use]
    pub fn roster_entry(&self) -> RosterEntry {
        RosterEntry {
            id: Some(UserId::new(ADMIN_USER_ID)),
            email: self.email.clone(),
            password: self.password.expose_secret().to_owned(),
            name: DEFAULT_ADMIN_NAME.to_owned(),
            role: Role::Admin,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default(
            &lookup,
            "EWASTE_DATA_DIR",
            DEFAULT_DATA_DIR,
        ));

        let storage = get_env_or_default(&lookup, "EWASTE_STORAGE", "file")
            .parse::<StorageBackend>()
            .map_err(|e| ConfigError::InvalidEnvVar("EWASTE_STORAGE".to_string(), e))?;

        let seed = parse_bool(&get_env_or_default(&lookup, "EWASTE_SEED", "true"))
            .ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "EWASTE_SEED".to_string(),
                    "expected 'true' or 'false'".to_string(),
                )
            })?;

        let admin = AdminConfig::from_lookup(&lookup)?;

        Ok(Self {
            data_dir,
            storage,
            seed,
            admin,
        })
    }
}

impl AdminConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let email = Email::parse(&get_env_or_default(
            lookup,
            "EWASTE_ADMIN_EMAIL",
            DEFAULT_ADMIN_EMAIL,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("EWASTE_ADMIN_EMAIL".to_string(), e.to_string()))?;

        let password = get_env_or_default(lookup, "EWASTE_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD);
        if password.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "EWASTE_ADMIN_PASSWORD".to_string(),
                "cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            email,
            password: SecretString::from(password),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
