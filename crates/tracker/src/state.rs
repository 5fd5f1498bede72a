//! Application state wiring the stores to one storage backend.

use std::sync::Arc;

use crate::config::{StorageBackend, TrackerConfig};
use crate::error::TrackerError;
use crate::insights::CalculatorStore;
use crate::models::Identity;
use crate::services::{ClassificationStore, MarketplaceStore, SessionStore};
use crate::storage::{FileStorage, MemoryStorage, SharedStorage};

/// Everything a front end needs, constructed once at start-up.
///
/// All stores share the same storage backend. Mutating accessors take
/// `&mut self`; there is no internal locking.
pub struct AppState {
    config: TrackerConfig,
    storage: SharedStorage,
    session: SessionStore,
    classifications: ClassificationStore,
    marketplace: MarketplaceStore,
    calculator: CalculatorStore,
}

impl AppState {
    /// Open the configured storage backend and load every store from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file storage directory cannot be created.
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        let storage: SharedStorage = match config.storage {
            StorageBackend::File => Arc::new(FileStorage::open(&config.data_dir)?),
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        };
        Ok(Self::with_storage(config, storage))
    }

    /// Load every store from an existing storage backend.
    #[must_use]
    pub fn with_storage(config: TrackerConfig, storage: SharedStorage) -> Self {
        let session = SessionStore::load(Arc::clone(&storage), config.admin.roster_entry());
        let classifications = ClassificationStore::load(Arc::clone(&storage), config.seed);
        let marketplace = MarketplaceStore::load(Arc::clone(&storage), config.seed);
        let calculator = CalculatorStore::new(Arc::clone(&storage));

        tracing::debug!(
            backend = ?config.storage,
            seed = config.seed,
            "Initialized application state"
        );

        Self {
            config,
            storage,
            session,
            classifications,
            marketplace,
            calculator,
        }
    }

    /// Get a reference to the tracker configuration.
    #[must_use]
    pub const fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Get the shared storage backend.
    #[must_use]
    pub fn storage(&self) -> SharedStorage {
        Arc::clone(&self.storage)
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    #[must_use]
    pub const fn classifications(&self) -> &ClassificationStore {
        &self.classifications
    }

    pub const fn classifications_mut(&mut self) -> &mut ClassificationStore {
        &mut self.classifications
    }

    #[must_use]
    pub const fn marketplace(&self) -> &MarketplaceStore {
        &self.marketplace
    }

    pub const fn marketplace_mut(&mut self) -> &mut MarketplaceStore {
        &mut self.marketplace
    }

    #[must_use]
    pub const fn calculator(&self) -> &CalculatorStore {
        &self.calculator
    }

    /// The logged-in identity.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::NotAuthenticated` if nobody is logged in.
    pub fn require_identity(&self) -> Result<&Identity, TrackerError> {
        self.session.current().ok_or(TrackerError::NotAuthenticated)
    }
}
