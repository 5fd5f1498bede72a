//! Search, filter and sort over classification history and listings.

use std::cmp::Ordering;

use ewaste_core::Condition;

use crate::models::{Classification, Listing};

/// Ordering for classification history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistorySort {
    /// Newest first.
    #[default]
    Date,
    /// Highest confidence first.
    Confidence,
    /// Object name, A to Z.
    Name,
}

impl std::str::FromStr for HistorySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(Self::Date),
            "confidence" => Ok(Self::Confidence),
            "name" => Ok(Self::Name),
            _ => Err(format!("invalid history sort: {s}")),
        }
    }
}

/// Filter and ordering applied to classification history.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Case-insensitive substring of the object name or category.
    pub search: Option<String>,
    /// Exact category to keep.
    pub category: Option<String>,
    pub sort: HistorySort,
}

impl HistoryQuery {
    /// Records matching the query, in the requested order.
    ///
    /// Sorting is stable, so records that compare equal keep their input
    /// order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a Classification>
    where
        I: IntoIterator<Item = &'a Classification>,
    {
        let needle = self.search.as_deref().map(str::to_lowercase);

        let mut matches: Vec<_> = records
            .into_iter()
            .filter(|record| {
                needle.as_deref().is_none_or(|needle| {
                    contains_folded(&record.object_name, needle)
                        || contains_folded(&record.category, needle)
                })
            })
            .filter(|record| {
                self.category
                    .as_deref()
                    .is_none_or(|category| record.category == category)
            })
            .collect();

        match self.sort {
            HistorySort::Date => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            HistorySort::Confidence => {
                matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
            }
            HistorySort::Name => matches.sort_by(|a, b| by_name(&a.object_name, &b.object_name)),
        }
        matches
    }
}

/// Distinct categories in first-seen order.
pub fn categories<'a, I>(records: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Classification>,
{
    let mut seen = Vec::new();
    for record in records {
        if !seen.contains(&record.category.as_str()) {
            seen.push(record.category.as_str());
        }
    }
    seen
}

/// Ordering for marketplace listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingSort {
    /// Newest first.
    #[default]
    Newest,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

impl std::str::FromStr for ListingSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            _ => Err(format!("invalid listing sort: {s}")),
        }
    }
}

/// Filter and ordering applied to marketplace listings.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    /// Case-insensitive substring of the title or description.
    pub search: Option<String>,
    /// Exact category to keep.
    pub category: Option<String>,
    pub condition: Option<Condition>,
    pub sort: ListingSort,
}

impl ListingQuery {
    /// Listings matching the query, in the requested order.
    pub fn apply<'a, I>(&self, listings: I) -> Vec<&'a Listing>
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        let needle = self.search.as_deref().map(str::to_lowercase);

        let mut matches: Vec<_> = listings
            .into_iter()
            .filter(|listing| {
                needle.as_deref().is_none_or(|needle| {
                    contains_folded(&listing.title, needle)
                        || contains_folded(&listing.description, needle)
                })
            })
            .filter(|listing| {
                self.category
                    .as_deref()
                    .is_none_or(|category| listing.category == category)
            })
            .filter(|listing| {
                self.condition
                    .is_none_or(|condition| listing.condition == condition)
            })
            .collect();

        match self.sort {
            ListingSort::Newest => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ListingSort::PriceLow => matches.sort_by_key(|listing| listing.price),
            ListingSort::PriceHigh => matches.sort_by(|a, b| b.price.cmp(&a.price)),
        }
        matches
    }
}

fn contains_folded(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

/// Case-insensitive name order, falling back to byte order.
fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use ewaste_core::{ClassificationId, ListingId, Price, UserId};

    use super::*;

    fn record(name: &str, category: &str, confidence: f64, day: u32) -> Classification {
        Classification {
            id: ClassificationId::generate(),
            user_id: UserId::new("1"),
            image_url: String::new(),
            object_name: name.to_owned(),
            category: category.to_owned(),
            hazardous_elements: vec!["Lead".to_owned()],
            confidence,
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    fn listing(title: &str, price: u32, condition: Condition, day: u32) -> Listing {
        Listing {
            id: ListingId::generate(),
            seller_id: UserId::new("1"),
            seller_name: "Seller".to_owned(),
            title: title.to_owned(),
            description: format!("{title} for sale"),
            price: Price::from_units(price),
            condition,
            category: "Laptops".to_owned(),
            images: vec!["a.jpg".to_owned()],
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            is_active: true,
        }
    }

    fn names<'a>(records: &[&'a Classification]) -> Vec<&'a str> {
        records.iter().map(|r| r.object_name.as_str()).collect()
    }

    #[test]
    fn test_history_defaults_to_newest_first() {
        let records = [
            record("Old", "Battery", 50.0, 1),
            record("New", "Battery", 60.0, 3),
            record("Mid", "Battery", 70.0, 2),
        ];
        let result = HistoryQuery::default().apply(&records);
        assert_eq!(names(&result), ["New", "Mid", "Old"]);
    }

    #[test]
    fn test_history_search_is_case_insensitive_over_name_and_category() {
        let records = [
            record("Laptop Battery", "Battery", 90.0, 1),
            record("Smartphone", "Mobile Device", 80.0, 2),
            record("Router", "Networking", 70.0, 3),
        ];
        let query = HistoryQuery {
            search: Some("BATT".to_owned()),
            ..HistoryQuery::default()
        };
        assert_eq!(names(&query.apply(&records)), ["Laptop Battery"]);

        let query = HistoryQuery {
            search: Some("mobile".to_owned()),
            ..HistoryQuery::default()
        };
        assert_eq!(names(&query.apply(&records)), ["Smartphone"]);
    }

    #[test]
    fn test_history_category_and_sorts() {
        let records = [
            record("b-item", "Battery", 70.0, 1),
            record("A-item", "Battery", 95.0, 2),
            record("c-item", "Other", 99.0, 3),
        ];
        let by_confidence = HistoryQuery {
            category: Some("Battery".to_owned()),
            sort: HistorySort::Confidence,
            ..HistoryQuery::default()
        };
        assert_eq!(names(&by_confidence.apply(&records)), ["A-item", "b-item"]);

        let by_name = HistoryQuery {
            sort: HistorySort::Name,
            ..HistoryQuery::default()
        };
        assert_eq!(names(&by_name.apply(&records)), ["A-item", "b-item", "c-item"]);
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let records = [
            record("a", "Battery", 1.0, 1),
            record("b", "Laptop", 1.0, 1),
            record("c", "Battery", 1.0, 1),
        ];
        assert_eq!(categories(&records), ["Battery", "Laptop"]);
    }

    #[test]
    fn test_listing_filters() {
        let listings = [
            listing("Gaming Laptop", 200, Condition::Parts, 1),
            listing("Office Laptop", 300, Condition::Good, 2),
            listing("Tablet", 100, Condition::Good, 3),
        ];
        let query = ListingQuery {
            search: Some("laptop".to_owned()),
            condition: Some(Condition::Good),
            ..ListingQuery::default()
        };
        let result = query.apply(&listings);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Office Laptop");
    }

    #[test]
    fn test_listing_sorts() {
        let listings = [
            listing("Mid", 200, Condition::Good, 1),
            listing("Cheap", 100, Condition::Good, 2),
            listing("Dear", 300, Condition::Good, 3),
        ];
        let titles = |sort| {
            ListingQuery {
                sort,
                ..ListingQuery::default()
            }
            .apply(&listings)
            .into_iter()
            .map(|l| l.title.as_str())
            .collect::<Vec<_>>()
        };

        assert_eq!(titles(ListingSort::Newest), ["Dear", "Cheap", "Mid"]);
        assert_eq!(titles(ListingSort::PriceLow), ["Cheap", "Mid", "Dear"]);
        assert_eq!(titles(ListingSort::PriceHigh), ["Dear", "Mid", "Cheap"]);
    }

    #[test]
    fn test_sort_from_str() {
        assert_eq!("price-low".parse::<ListingSort>().unwrap(), ListingSort::PriceLow);
        assert_eq!("confidence".parse::<HistorySort>().unwrap(), HistorySort::Confidence);
        assert!("cheapest".parse::<ListingSort>().is_err());
    }
}
