//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// The boolean `login`/`register` contract collapses all of these to
/// `false`; the typed variants exist for logging and for callers that use
/// the `try_*` methods.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] ewaste_core::EmailError),

    /// Invalid credentials (wrong password or unknown email).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already registered.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Display name is empty.
    #[error("name cannot be blank")]
    BlankName,

    /// Password is empty.
    #[error("password cannot be empty")]
    EmptyPassword,
}
