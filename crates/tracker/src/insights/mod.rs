//! Read-only views derived from stored records.
//!
//! Dashboards, history, marketplace browsing and the impact tracker all
//! compute from the same store contents; these are the shared aggregations.
//! Nothing here touches storage except [`CalculatorStore`].

pub mod calculator;
pub mod hazard;
pub mod impact;
pub mod query;

pub use calculator::{CalculatorInputs, CalculatorState, CalculatorStore, CarbonFootprint, Diet};
pub use hazard::hazard_level;
pub use impact::{
    Achievement, DailyCount, ImpactSummary, MonthlyImpact, activity_by_user, daily_trend,
    monthly_trend,
};
pub use query::{HistoryQuery, HistorySort, ListingQuery, ListingSort, categories};
