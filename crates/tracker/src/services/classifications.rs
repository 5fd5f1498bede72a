//! Classification store.
//!
//! Append-only, newest-first list of classification records persisted under
//! the `classifications` key. Records are validated on entry and never
//! modified or deleted afterwards.

use chrono::{DateTime, TimeZone, Utc};

use ewaste_core::{ClassificationId, UserId};

use crate::error::ValidationError;
use crate::models::session::keys;
use crate::models::{Classification, NewClassification};
use crate::storage::{self, SharedStorage};

/// Owner of the demonstration records.
pub const SEED_USER_ID: &str = "1";

/// Classification records, newest first.
pub struct ClassificationStore {
    storage: SharedStorage,
    records: Vec<Classification>,
}

impl ClassificationStore {
    /// Load persisted records.
    ///
    /// When nothing usable is persisted (missing or corrupt) the store starts
    /// from the demonstration records if `seed` is set, otherwise empty. A
    /// persisted empty list stays empty.
    #[must_use]
    pub fn load(storage: SharedStorage, seed: bool) -> Self {
        let records = storage::load_or_none::<Vec<Classification>>(&*storage, keys::CLASSIFICATIONS)
            .unwrap_or_else(|| if seed { seed_records() } else { Vec::new() });

        tracing::debug!(count = records.len(), "Loaded classification records");
        Self { storage, records }
    }

    /// Validate and store a new record in front of the list.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the record breaks an invariant; nothing
    /// is stored in that case.
    pub fn add(&mut self, new: NewClassification) -> Result<Classification, ValidationError> {
        new.validate()?;

        let record = new.into_record(ClassificationId::generate(), Utc::now());
        self.records.insert(0, record.clone());
        storage::persist(&*self.storage, keys::CLASSIFICATIONS, &self.records);

        tracing::info!(
            id = %record.id,
            user_id = %record.user_id,
            category = %record.category,
            "Stored classification"
        );
        Ok(record)
    }

    /// Records owned by `user_id`, newest first.
    #[must_use]
    pub fn by_user(&self, user_id: &UserId) -> Vec<&Classification> {
        self.records
            .iter()
            .filter(|record| &record.user_id == user_id)
            .collect()
    }

    /// Every record regardless of owner, newest first.
    #[must_use]
    pub fn all(&self) -> &[Classification] {
        &self.records
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: &ClassificationId) -> Option<&Classification> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no record is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Demonstration records shown before anything has been classified.
fn seed_records() -> Vec<Classification> {
    let owner = UserId::new(SEED_USER_ID);
    vec![
        seed_record(
            "1",
            &owner,
            "https://images.pexels.com/photos/442559/pexels-photo-442559.jpeg",
            "Laptop Battery",
            "Battery",
            &["Lead", "Cadmium", "Mercury"],
            94.2,
            seed_date(15),
        ),
        seed_record(
            "2",
            &owner,
            "https://images.pexels.com/photos/1181675/pexels-photo-1181675.jpeg",
            "Smartphone",
            "Mobile Device",
            &["Lithium", "Cobalt"],
            87.5,
            seed_date(14),
        ),
        seed_record(
            "3",
            &owner,
            "https://images.pexels.com/photos/2582937/pexels-photo-2582937.jpeg",
            "Circuit Board",
            "Electronic Component",
            &["Lead", "Mercury", "Chromium"],
            91.8,
            seed_date(13),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed_record(
    id: &str,
    owner: &UserId,
    image_url: &str,
    object_name: &str,
    category: &str,
    hazardous_elements: &[&str],
    confidence: f64,
    created_at: DateTime<Utc>,
) -> Classification {
    Classification {
        id: ClassificationId::new(id),
        user_id: owner.clone(),
        image_url: image_url.to_owned(),
        object_name: object_name.to_owned(),
        category: category.to_owned(),
        hazardous_elements: hazardous_elements.iter().map(|&e| e.to_owned()).collect(),
        confidence,
        created_at,
    }
}

/// Midnight UTC on the given day of January 2024.
fn seed_date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
