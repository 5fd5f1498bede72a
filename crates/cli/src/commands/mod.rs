//! Subcommand implementations.
//!
//! Results are reported through `tracing` at info level, like every other
//! message the binary prints.

pub mod auth;
pub mod calculator;
pub mod classify;
pub mod impact;
pub mod market;

use thiserror::Error;

use ewaste_tracker::TrackerError;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A store or the configuration failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Email and password did not match a registered account.
    #[error("Login failed: check email and password")]
    LoginFailed,

    /// The email is malformed or already registered, or a field is empty.
    #[error("Registration failed for {0}")]
    RegistrationFailed(String),

    /// The command is reserved for administrators.
    #[error("This command requires an administrator")]
    AdminOnly,

    /// The asking price is negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] ewaste_core::PriceError),
}
