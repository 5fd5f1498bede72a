//! Marketplace commands.

use rust_decimal::Decimal;

use ewaste_core::{Condition, ListingId, Price};
use ewaste_tracker::insights::{ListingQuery, ListingSort};
use ewaste_tracker::models::{Listing, NewListing};
use ewaste_tracker::{AppState, TrackerError};

use super::CommandError;

/// Fields of a listing entered on the command line.
pub struct Posting {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub condition: Condition,
    pub category: String,
    pub images: Vec<String>,
}

/// Post a listing as the logged-in user.
pub fn add(state: &mut AppState, posting: Posting) -> Result<(), CommandError> {
    let seller = state.require_identity()?;
    let new = NewListing {
        seller_id: seller.id.clone(),
        seller_name: seller.name.clone(),
        title: posting.title,
        description: posting.description,
        price: Price::new(posting.price)?,
        condition: posting.condition,
        category: posting.category,
        images: posting.images,
    };

    let listing = state
        .marketplace_mut()
        .add(new)
        .map_err(TrackerError::from)?;

    tracing::info!("Posted listing {}", listing.id);
    report(&listing);
    Ok(())
}

/// Remove a listing on behalf of the logged-in user.
pub fn remove(state: &mut AppState, id: &str) -> Result<(), CommandError> {
    let actor = state.require_identity()?.clone();
    let id = ListingId::new(id);

    match state
        .marketplace_mut()
        .remove(&id, &actor)
        .map_err(TrackerError::from)?
    {
        Some(listing) => tracing::info!("Removed listing {} ({})", listing.id, listing.title),
        None => tracing::info!("No listing with id {id}"),
    }
    Ok(())
}

/// Browse active listings from every seller.
pub fn list(
    state: &AppState,
    search: Option<String>,
    category: Option<String>,
    condition: Option<Condition>,
    sort: ListingSort,
) {
    let query = ListingQuery {
        search,
        category,
        condition,
        sort,
    };

    let listings = query.apply(state.marketplace().active());
    if listings.is_empty() {
        tracing::info!("No listings found");
    }
    for listing in listings {
        report(listing);
    }
}

/// List the logged-in user's listings.
pub fn mine(state: &AppState) -> Result<(), CommandError> {
    let identity = state.require_identity()?;
    let listings = state.marketplace().by_user(&identity.id);
    tracing::info!("{} listings", listings.len());
    for listing in listings {
        report(listing);
    }
    Ok(())
}

fn report(listing: &Listing) {
    tracing::info!(
        "{} | {} | {} | {} | {} | seller {} | {}",
        listing.id,
        listing.title,
        listing.price,
        listing.condition,
        listing.category,
        listing.seller_name,
        listing.created_at.format("%Y-%m-%d")
    );
}
