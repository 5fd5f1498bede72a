//! Session commands.

use ewaste_core::Role;
use ewaste_tracker::AppState;

use super::CommandError;

/// Log in and persist the session.
pub fn login(state: &mut AppState, email: &str, password: &str) -> Result<(), CommandError> {
    if !state.session_mut().login(email, password) {
        return Err(CommandError::LoginFailed);
    }
    whoami(state)
}

/// Register an account and log in as it.
pub fn register(
    state: &mut AppState,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<(), CommandError> {
    if !state.session_mut().register(name, email, password, role) {
        return Err(CommandError::RegistrationFailed(email.to_owned()));
    }
    whoami(state)
}

pub fn logout(state: &mut AppState) {
    state.session_mut().logout();
    tracing::info!("Logged out");
}

/// Show the logged-in identity.
pub fn whoami(state: &AppState) -> Result<(), CommandError> {
    let identity = state.require_identity()?;
    tracing::info!(
        "Logged in as {} <{}> (id {}, role {})",
        identity.name,
        identity.email,
        identity.id,
        identity.role
    );
    Ok(())
}
