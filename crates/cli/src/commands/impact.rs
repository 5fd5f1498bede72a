//! Impact summary command.

use chrono::Utc;

use ewaste_tracker::AppState;
use ewaste_tracker::insights::{
    Achievement, ImpactSummary, activity_by_user, daily_trend, monthly_trend,
};
use ewaste_tracker::models::Classification;

use super::CommandError;

/// Report impact for the logged-in user, or for everyone with `all`.
pub fn show(state: &AppState, all: bool, months: u32, days: u32) -> Result<(), CommandError> {
    let identity = state.require_identity()?;
    if all && !identity.is_admin() {
        return Err(CommandError::AdminOnly);
    }

    let records: Vec<&Classification> = if all {
        state.classifications().all().iter().collect()
    } else {
        state.classifications().by_user(&identity.id)
    };

    let summary = ImpactSummary::from_records(records.iter().copied());
    tracing::info!(
        "Items classified: {} ({} hazardous)",
        summary.total_items,
        summary.hazardous_items
    );
    tracing::info!(
        "Estimated savings: {:.1} kg CO2, {:.0} kWh, {:.0} L water",
        summary.co2_saved_kg,
        summary.energy_saved_kwh,
        summary.water_saved_liters
    );
    tracing::info!(
        "Top category: {}",
        summary.top_category().unwrap_or("N/A")
    );
    for (category, count) in &summary.categories {
        tracing::info!("  {category}: {count}");
    }
    for (element, count) in &summary.hazardous_elements {
        tracing::info!("  hazard {element}: {count}");
    }

    for achievement in Achievement::ALL {
        if achievement.is_earned(&summary) {
            tracing::info!("[x] {} - {}", achievement.title(), achievement.description());
        } else {
            tracing::info!(
                "[ ] {} - {} ({:.0} to go)",
                achievement.title(),
                achievement.description(),
                achievement.remaining(&summary)
            );
        }
    }

    let today = Utc::now().date_naive();
    for day in daily_trend(records.iter().copied(), today, days) {
        tracing::info!("{}: {}", day.date.format("%b %d"), day.count);
    }
    for month in monthly_trend(records.iter().copied(), today, months) {
        tracing::info!(
            "{}: {} items, {:.1} kg CO2",
            month.month.format("%b %Y"),
            month.items,
            month.co2_kg
        );
    }

    if all {
        for (user_id, count) in activity_by_user(records.iter().copied()).into_iter().take(10) {
            tracing::info!("user {user_id}: {count} classifications");
        }
    }
    Ok(())
}
