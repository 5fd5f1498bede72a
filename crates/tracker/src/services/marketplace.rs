//! Marketplace store.
//!
//! Newest-first list of listings persisted under the `marketplaceItems` key.
//! Listings are validated on entry, posted active, and hard-deleted on
//! removal. Only the seller or an administrator may remove a listing.

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

use ewaste_core::{Condition, ListingId, Price, UserId};

use crate::error::ValidationError;
use crate::models::session::keys;
use crate::models::{Identity, Listing, NewListing};
use crate::storage::{self, SharedStorage};

/// Errors from marketplace operations other than validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarketplaceError {
    /// The caller neither owns the listing nor is an administrator.
    #[error("user {actor} may not remove listing {listing} owned by {seller}")]
    Forbidden {
        /// Listing the caller tried to remove.
        listing: ListingId,
        /// Owner of the listing.
        seller: UserId,
        /// Caller.
        actor: UserId,
    },
}

/// Marketplace listings, newest first.
pub struct MarketplaceStore {
    storage: SharedStorage,
    listings: Vec<Listing>,
}

impl MarketplaceStore {
    /// Load persisted listings.
    ///
    /// When nothing usable is persisted (missing or corrupt) the store starts
    /// from the demonstration listings if `seed` is set, otherwise empty. A
    /// persisted empty list stays empty.
    #[must_use]
    pub fn load(storage: SharedStorage, seed: bool) -> Self {
        let listings = storage::load_or_none::<Vec<Listing>>(&*storage, keys::LISTINGS)
            .unwrap_or_else(|| if seed { seed_listings() } else { Vec::new() });

        tracing::debug!(count = listings.len(), "Loaded marketplace listings");
        Self { storage, listings }
    }

    /// Validate and post a new listing in front of the list.
    ///
    /// The stored listing is always active.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the listing breaks an invariant; nothing
    /// is stored in that case.
    pub fn add(&mut self, new: NewListing) -> Result<Listing, ValidationError> {
        new.validate()?;

        let listing = new.into_listing(ListingId::generate(), Utc::now());
        self.listings.insert(0, listing.clone());
        self.persist();

        tracing::info!(
            id = %listing.id,
            seller_id = %listing.seller_id,
            price = %listing.price,
            "Posted listing"
        );
        Ok(listing)
    }

    /// Delete the listing with `id` on behalf of `actor`.
    ///
    /// Returns the removed listing, or `None` if no listing has that id
    /// (removing twice is a no-op).
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::Forbidden` if `actor` is neither the
    /// seller nor an administrator; the listing is kept.
    pub fn remove(
        &mut self,
        id: &ListingId,
        actor: &Identity,
    ) -> Result<Option<Listing>, MarketplaceError> {
        let Some(index) = self.listings.iter().position(|listing| &listing.id == id) else {
            tracing::debug!(id = %id, "Remove requested for unknown listing");
            return Ok(None);
        };

        if let Some(seller) = self.listings.get(index).map(|l| &l.seller_id)
            && seller != &actor.id
            && !actor.is_admin()
        {
            tracing::warn!(id = %id, actor = %actor.id, "Refused listing removal");
            return Err(MarketplaceError::Forbidden {
                listing: id.clone(),
                seller: seller.clone(),
                actor: actor.id.clone(),
            });
        }

        let removed = self.listings.remove(index);
        self.persist();

        tracing::info!(id = %removed.id, actor = %actor.id, "Removed listing");
        Ok(Some(removed))
    }

    /// Listings posted by `user_id`, active or not, newest first.
    #[must_use]
    pub fn by_user(&self, user_id: &UserId) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|listing| &listing.seller_id == user_id)
            .collect()
    }

    /// Active listings from every seller, newest first.
    #[must_use]
    pub fn active(&self) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|listing| listing.is_active)
            .collect()
    }

    /// Look up a listing by id.
    #[must_use]
    pub fn get(&self, id: &ListingId) -> Option<&Listing> {
        self.listings.iter().find(|listing| &listing.id == id)
    }

    /// Number of stored listings, active or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether no listing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    fn persist(&self) {
        storage::persist(&*self.storage, keys::LISTINGS, &self.listings);
    }
}

/// Demonstration listings shown before anything has been posted.
fn seed_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: ListingId::new("1"),
            seller_id: UserId::new("1"),
            seller_name: "John Doe".to_owned(),
            title: "iPhone 12 Pro - Excellent Condition".to_owned(),
            description: "Barely used iPhone 12 Pro with original box, charger, and screen \
                          protector. Battery health at 95%."
                .to_owned(),
            price: Price::from_units(650),
            condition: Condition::Excellent,
            category: "Smartphones".to_owned(),
            images: vec![
                "https://images.pexels.com/photos/1181675/pexels-photo-1181675.jpeg?w=400&h=300&fit=crop"
                    .to_owned(),
            ],
            created_at: seed_date(15),
            is_active: true,
        },
        Listing {
            id: ListingId::new("2"),
            seller_id: UserId::new("2"),
            seller_name: "Jane Smith".to_owned(),
            title: "Gaming Laptop - Parts Only".to_owned(),
            description: "ASUS ROG laptop with motherboard issues. Screen, keyboard, and other \
                          components work perfectly."
                .to_owned(),
            price: Price::from_units(200),
            condition: Condition::Parts,
            category: "Laptops".to_owned(),
            images: vec![
                "https://images.pexels.com/photos/442559/pexels-photo-442559.jpeg?w=400&h=300&fit=crop"
                    .to_owned(),
            ],
            created_at: seed_date(14),
            is_active: true,
        },
    ]
}

/// Midnight UTC on the given day of January 2024.
fn seed_date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
