//! Classification commands.

use ewaste_tracker::AppState;
use ewaste_tracker::insights::{HistoryQuery, HistorySort, categories, hazard_level};
use ewaste_tracker::models::{Classification, NewClassification};

use super::CommandError;

/// Fields of a classification entered on the command line.
pub struct Submission {
    pub object_name: String,
    pub category: String,
    pub hazardous_elements: Vec<String>,
    pub confidence: f64,
    pub image_url: String,
}

/// Store a classification for the logged-in user.
pub fn add(state: &mut AppState, submission: Submission) -> Result<(), CommandError> {
    let user_id = state.require_identity()?.id.clone();

    let record = state
        .classifications_mut()
        .add(NewClassification {
            user_id,
            image_url: submission.image_url,
            object_name: submission.object_name,
            category: submission.category,
            hazardous_elements: submission.hazardous_elements,
            confidence: submission.confidence,
        })
        .map_err(ewaste_tracker::TrackerError::from)?;

    tracing::info!("Stored classification {}", record.id);
    report(&record);
    Ok(())
}

/// List the logged-in user's classifications.
pub fn list(
    state: &AppState,
    search: Option<String>,
    category: Option<String>,
    sort: HistorySort,
) -> Result<(), CommandError> {
    let identity = state.require_identity()?;
    let query = HistoryQuery {
        search,
        category,
        sort,
    };

    let history = state.classifications().by_user(&identity.id);
    let options = categories(history.iter().copied());
    if !options.is_empty() {
        tracing::info!("Categories: {}", options.join(", "));
    }

    let records = query.apply(history);
    if records.is_empty() {
        tracing::info!("No classifications found");
    }
    for record in records {
        report(record);
    }
    Ok(())
}

/// List every user's classifications.
pub fn all(state: &AppState) -> Result<(), CommandError> {
    if !state.require_identity()?.is_admin() {
        return Err(CommandError::AdminOnly);
    }

    let records = state.classifications().all();
    tracing::info!("{} classifications", records.len());
    for record in records {
        report(record);
    }
    Ok(())
}

fn report(record: &Classification) {
    tracing::info!(
        "{} | {} [{}] {:.1}% | {} hazard: {} | {} | owner {}",
        record.id,
        record.object_name,
        record.category,
        record.confidence,
        hazard_level(&record.hazardous_elements),
        record.hazardous_elements.join(", "),
        record.created_at.format("%Y-%m-%d"),
        record.user_id
    );
}
