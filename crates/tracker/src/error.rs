//! Unified error handling.
//!
//! Store operations keep their narrow error types ([`ValidationError`],
//! [`MarketplaceError`], [`AuthError`]); [`TrackerError`] unifies them for
//! callers such as the CLI that drive several stores at once.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::marketplace::MarketplaceError;
use crate::storage::StorageError;

/// A record rejected at a store's entry point.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace.
    #[error("{field} cannot be blank")]
    Blank {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Confidence is not a finite number in `0..=100`.
    #[error("confidence must be between 0 and 100 (got {0})")]
    ConfidenceOutOfRange(f64),

    /// A classification lists no hazardous elements.
    #[error("at least one hazardous element is required")]
    NoHazardousElements,

    /// A hazardous element entry is blank.
    #[error("hazardous element #{index} cannot be blank")]
    BlankHazardousElement {
        /// Zero-based position in the list.
        index: usize,
    },

    /// A listing has too few or too many images.
    #[error("a listing needs between {min} and {max} images (got {count})")]
    ImageCount {
        /// Number of images supplied.
        count: usize,
        /// Minimum allowed.
        min: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// An image reference is blank.
    #[error("image #{index} cannot be blank")]
    BlankImage {
        /// Zero-based position in the list.
        index: usize,
    },
}

/// Application-level error type.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// A record failed validation.
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    /// A marketplace operation was refused.
    #[error("Marketplace error: {0}")]
    Marketplace(#[from] MarketplaceError),

    /// The operation needs a logged-in identity.
    #[error("Not logged in")]
    NotAuthenticated,
}

/// Require a non-blank text field.
pub(crate) fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}
