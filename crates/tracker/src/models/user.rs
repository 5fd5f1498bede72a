//! User domain types.

use serde::{Deserialize, Serialize};

use ewaste_core::{Email, Role, UserId};

/// Fixed id of the built-in administrator.
pub const ADMIN_USER_ID: &str = "1";

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user id, assigned at registration.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: Email,
    /// Account role.
    pub role: Role,
}

impl Identity {
    /// Whether this identity has administrator privileges.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// One registered account in the credential roster.
///
/// The password is stored as entered; `Debug` redacts it.
#[derive(Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Stable user id. Rosters written before ids were tracked lack it; the
    /// session store fills it in on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Login email, unique across the roster.
    pub email: Email,
    /// Password as entered at registration.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
}

impl RosterEntry {
    /// The identity this entry logs in as.
    ///
    /// Returns `None` for an entry that has not been assigned an id yet.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        Some(Identity {
            id: self.id.clone()?,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        })
    }

    /// Exact credential match: same email and same password.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email.as_str() == email && self.password == password
    }
}

impl std::fmt::Debug for RosterEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterEntry")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .field("role", &self.role)
            .finish()
    }
}
