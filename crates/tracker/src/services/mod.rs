//! Stateful services backed by the shared key-value storage.
//!
//! Each service owns its slice of state and writes it through on every
//! mutation.

pub mod auth;
pub mod classifications;
pub mod marketplace;

pub use auth::{AuthError, SessionStore};
pub use classifications::ClassificationStore;
pub use marketplace::{MarketplaceError, MarketplaceStore};
