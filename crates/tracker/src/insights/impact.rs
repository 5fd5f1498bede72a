//! Environmental impact aggregations over classification records.

use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use ewaste_core::UserId;

use crate::models::Classification;

/// CO2 kept out of the atmosphere per recycled item, in kilograms.
pub const CO2_PER_ITEM_KG: f64 = 2.3;
/// Energy saved per recycled item, in kilowatt-hours.
pub const ENERGY_PER_ITEM_KWH: f64 = 15.0;
/// Water saved per recycled item, in litres.
pub const WATER_PER_ITEM_LITERS: f64 = 18.0;

/// Milestones a user can reach by classifying items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Classified a first item.
    FirstSteps,
    /// Classified ten or more items.
    EcoWarrior,
    /// Identified five or more hazardous items.
    HazardDetective,
    /// Saved 100 kg or more of CO2.
    PlanetProtector,
}

impl Achievement {
    /// Every achievement in display order.
    pub const ALL: [Self; 4] = [
        Self::FirstSteps,
        Self::EcoWarrior,
        Self::HazardDetective,
        Self::PlanetProtector,
    ];

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::FirstSteps => "First Steps",
            Self::EcoWarrior => "Eco Warrior",
            Self::HazardDetective => "Hazard Detective",
            Self::PlanetProtector => "Planet Protector",
        }
    }

    /// One-line description of the requirement.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::FirstSteps => "Classified your first item",
            Self::EcoWarrior => "Classified 10+ items",
            Self::HazardDetective => "Identified 5+ hazardous items",
            Self::PlanetProtector => "Saved 100kg+ CO2",
        }
    }

    /// Threshold the relevant metric must reach.
    #[must_use]
    pub const fn requirement(self) -> f64 {
        match self {
            Self::FirstSteps => 1.0,
            Self::EcoWarrior => 10.0,
            Self::HazardDetective => 5.0,
            Self::PlanetProtector => 100.0,
        }
    }

    /// How far `summary` is from the threshold; zero once earned.
    #[must_use]
    pub fn remaining(self, summary: &ImpactSummary) -> f64 {
        (self.requirement() - self.progress(summary)).max(0.0)
    }

    /// Whether `summary` meets the threshold.
    #[must_use]
    pub fn is_earned(self, summary: &ImpactSummary) -> bool {
        self.progress(summary) >= self.requirement()
    }

    // Counts stay far below f64's exact integer range.
    #[allow(clippy::cast_precision_loss)]
    fn progress(self, summary: &ImpactSummary) -> f64 {
        match self {
            Self::FirstSteps | Self::EcoWarrior => summary.total_items as f64,
            Self::HazardDetective => summary.hazardous_items as f64,
            Self::PlanetProtector => summary.co2_saved_kg,
        }
    }
}

/// Impact metrics derived from a set of classification records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    /// Number of records.
    pub total_items: usize,
    /// Records listing at least one hazardous element.
    pub hazardous_items: usize,
    /// Estimated CO2 saved, kg.
    pub co2_saved_kg: f64,
    /// Estimated energy saved, kWh.
    pub energy_saved_kwh: f64,
    /// Estimated water saved, litres.
    pub water_saved_liters: f64,
    /// Records per category, most frequent first, ties by name.
    pub categories: Vec<(String, usize)>,
    /// Occurrences per hazardous element, most frequent first, ties by name.
    pub hazardous_elements: Vec<(String, usize)>,
}

impl ImpactSummary {
    /// Aggregate `records`.
    // Counts stay far below f64's exact integer range.
    #[allow(clippy::cast_precision_loss)]
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Classification>,
    {
        let mut total_items = 0;
        let mut hazardous_items = 0;
        let mut categories: HashMap<&str, usize> = HashMap::new();
        let mut elements: HashMap<&str, usize> = HashMap::new();

        for record in records {
            total_items += 1;
            if record.is_hazardous() {
                hazardous_items += 1;
            }
            *categories.entry(record.category.as_str()).or_default() += 1;
            for element in &record.hazardous_elements {
                *elements.entry(element.as_str()).or_default() += 1;
            }
        }

        let items = total_items as f64;
        Self {
            total_items,
            hazardous_items,
            co2_saved_kg: items * CO2_PER_ITEM_KG,
            energy_saved_kwh: items * ENERGY_PER_ITEM_KWH,
            water_saved_liters: items * WATER_PER_ITEM_LITERS,
            categories: ranked(categories),
            hazardous_elements: ranked(elements),
        }
    }

    /// The most frequent category, if any records were aggregated.
    #[must_use]
    pub fn top_category(&self) -> Option<&str> {
        self.categories.first().map(|(name, _)| name.as_str())
    }

    /// Achievements earned so far, in display order.
    #[must_use]
    pub fn achievements(&self) -> Vec<Achievement> {
        Achievement::ALL
            .into_iter()
            .filter(|achievement| achievement.is_earned(self))
            .collect()
    }
}

/// Classification count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

/// Items recycled and CO2 saved in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyImpact {
    /// First day of the month.
    pub month: NaiveDate,
    pub items: usize,
    pub co2_kg: f64,
}

/// Classification counts per owner, most active first, ties by id.
pub fn activity_by_user<'a, I>(records: I) -> Vec<(UserId, usize)>
where
    I: IntoIterator<Item = &'a Classification>,
{
    let mut counts: HashMap<&UserId, usize> = HashMap::new();
    for record in records {
        *counts.entry(&record.user_id).or_default() += 1;
    }

    let mut activity: Vec<_> = counts
        .into_iter()
        .map(|(user, count)| (user.clone(), count))
        .collect();
    activity.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    activity
}

/// Per-day counts for the `days` days ending with `today`, oldest first.
pub fn daily_trend<'a, I>(records: I, today: NaiveDate, days: u32) -> Vec<DailyCount>
where
    I: IntoIterator<Item = &'a Classification>,
{
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for record in records {
        *per_day.entry(record.created_at.date_naive()).or_default() += 1;
    }

    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
        .map(|date| DailyCount {
            date,
            count: per_day.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}

/// Per-month items and CO2 for the `months` calendar months ending with the
/// month of `today`, oldest first.
// Counts stay far below f64's exact integer range.
#[allow(clippy::cast_precision_loss)]
pub fn monthly_trend<'a, I>(records: I, today: NaiveDate, months: u32) -> Vec<MonthlyImpact>
where
    I: IntoIterator<Item = &'a Classification>,
{
    let mut per_month: HashMap<(i32, u32), usize> = HashMap::new();
    for record in records {
        let date = record.created_at.date_naive();
        *per_month.entry((date.year(), date.month())).or_default() += 1;
    }

    let Some(current) = today.with_day(1) else {
        return Vec::new();
    };

    (0..months)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(|month| {
            let items = per_month
                .get(&(month.year(), month.month()))
                .copied()
                .unwrap_or_default();
            MonthlyImpact {
                month,
                items,
                co2_kg: items as f64 * CO2_PER_ITEM_KG,
            }
        })
        .collect()
}

/// Sort a frequency table by count descending, then name ascending.
fn ranked(counts: HashMap<&str, usize>) -> Vec<(String, usize)> {
    let mut ranked: Vec<_> = counts
        .into_iter()
        .map(|(name, count)| (name.to_owned(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}
