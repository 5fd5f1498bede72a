//! Marketplace listing types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ewaste_core::{Condition, ListingId, Price, UserId};

use crate::error::{ValidationError, require_text};

/// Fewest images a listing may carry.
pub const MIN_IMAGES: usize = 1;
/// Most images a listing may carry.
pub const MAX_IMAGES: usize = 5;

/// A for-sale item posted by a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub seller_id: UserId,
    /// Seller's name when the listing was posted. Not re-synced afterwards.
    pub seller_name: String,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub condition: Condition,
    pub category: String,
    /// Image references in display order.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    /// Always `true` today: nothing deactivates a listing, removal deletes it.
    pub is_active: bool,
}

/// A listing submitted for posting; the store assigns id, timestamp and
/// marks it active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub seller_id: UserId,
    pub seller_name: String,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub condition: Condition,
    pub category: String,
    pub images: Vec<String>,
}

impl NewListing {
    /// Check the listing's invariants.
    ///
    /// Price non-negativity is already guaranteed by [`Price`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found: blank title or category,
    /// an image count outside `1..=5`, or a blank image reference.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, "title")?;
        require_text(&self.category, "category")?;

        let count = self.images.len();
        if !(MIN_IMAGES..=MAX_IMAGES).contains(&count) {
            return Err(ValidationError::ImageCount {
                count,
                min: MIN_IMAGES,
                max: MAX_IMAGES,
            });
        }

        if let Some(index) = self.images.iter().position(|i| i.trim().is_empty()) {
            return Err(ValidationError::BlankImage { index });
        }

        Ok(())
    }

    /// Stamp the submission into an active stored listing.
    #[must_use]
    pub fn into_listing(self, id: ListingId, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            seller_id: self.seller_id,
            seller_name: self.seller_name,
            title: self.title,
            description: self.description,
            price: self.price,
            condition: self.condition,
            category: self.category,
            images: self.images,
            created_at,
            is_active: true,
        }
    }
}
