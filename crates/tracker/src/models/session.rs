//! Session-related types.
//!
//! Storage keys and the placeholder token written alongside the current
//! identity.

use ewaste_core::UserId;

/// Placeholder session token. There is no server to mint a real one; its
/// presence only marks "a session was persisted".
pub const SESSION_TOKEN: &str = "mock-jwt-token";

/// Storage keys, one per concern.
pub mod keys {
    use super::UserId;

    /// Key for the session token marker.
    pub const TOKEN: &str = "token";

    /// Key for the current logged-in identity.
    pub const CURRENT_USER: &str = "userData";

    /// Key for the credential roster.
    pub const ROSTER: &str = "registeredUsers";

    /// Key for classification records.
    pub const CLASSIFICATIONS: &str = "classifications";

    /// Key for marketplace listings.
    pub const LISTINGS: &str = "marketplaceItems";

    /// Key for a user's carbon calculator state.
    #[must_use]
    pub fn calculator(user_id: &UserId) -> String {
        format!("carbonCalculator_{user_id}")
    }
}
