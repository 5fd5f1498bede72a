//! Integration tests for the E-Waste Tracker.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ewaste-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session` - Login, registration and session persistence
//! - `records` - Classification and marketplace stores through `AppState`
//! - `persistence` - File storage across restarts and legacy state

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use ewaste_core::{Condition, Price, UserId};
use ewaste_tracker::models::{NewClassification, NewListing};
use ewaste_tracker::storage::{MemoryStorage, SharedStorage};
use ewaste_tracker::{AppState, TrackerConfig};

/// A tracker wired to a fresh storage backend.
pub struct TestContext {
    pub storage: SharedStorage,
    pub state: AppState,
}

impl TestContext {
    /// Seeded in-memory tracker.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()), true)
    }

    /// Tracker over `storage`, seeded or not.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration is rejected.
    #[must_use]
    pub fn with_storage(storage: SharedStorage, seed: bool) -> Self {
        let state = AppState::with_storage(test_config(seed), Arc::clone(&storage));
        Self { storage, state }
    }

    /// Reload every store from the same storage, as a restarted process would.
    #[must_use]
    pub fn restart(self) -> Self {
        let seed = self.state.config().seed;
        Self::with_storage(self.storage, seed)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration with every default except the seed flag.
///
/// # Panics
///
/// Panics if the default configuration is rejected.
#[must_use]
pub fn test_config(seed: bool) -> TrackerConfig {
    let seed = seed.to_string();
    TrackerConfig::from_lookup(|key| (key == "EWASTE_SEED").then(|| seed.clone()))
        .expect("default configuration is valid")
}

/// A valid classification submission.
#[must_use]
pub fn classification(user_id: &UserId, object_name: &str) -> NewClassification {
    NewClassification {
        user_id: user_id.clone(),
        image_url: format!("{object_name}.jpg"),
        object_name: object_name.to_owned(),
        category: "Networking".to_owned(),
        hazardous_elements: vec!["Lead".to_owned()],
        confidence: 88.0,
    }
}

/// A valid listing submission.
#[must_use]
pub fn listing(seller_id: &UserId, seller_name: &str, title: &str) -> NewListing {
    NewListing {
        seller_id: seller_id.clone(),
        seller_name: seller_name.to_owned(),
        title: title.to_owned(),
        description: format!("{title}, works"),
        price: Price::from_units(25),
        condition: Condition::Good,
        category: "Accessories".to_owned(),
        images: vec![format!("{title}.jpg")],
    }
}
