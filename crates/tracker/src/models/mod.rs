//! Domain models for the tracker.
//!
//! These are the records the stores own and persist. JSON field names are
//! camelCase to match state written by earlier versions of the app.

pub mod classification;
pub mod listing;
pub mod session;
pub mod user;

pub use classification::{Classification, NewClassification};
pub use listing::{Listing, NewListing};
pub use user::{Identity, RosterEntry};
