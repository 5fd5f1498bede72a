//! Hazard grading for a list of hazardous elements.

use ewaste_core::HazardLevel;

/// Elements that make an item critical on their own.
const CRITICAL_ELEMENTS: &[&str] = &["Mercury", "Lead", "Cadmium"];

/// Elements that make an item high-hazard on their own.
const HIGH_ELEMENTS: &[&str] = &["Chromium", "Brominated Flame Retardants"];

/// Grade the hazard posed by an item containing `elements`.
///
/// Matching is exact and case-sensitive. Items with more than two elements
/// but none of the named ones are `Medium`; everything else is `Low`.
#[must_use]
pub fn hazard_level<S: AsRef<str>>(elements: &[S]) -> HazardLevel {
    let contains_any =
        |names: &[&str]| elements.iter().any(|element| names.contains(&element.as_ref()));

    if contains_any(CRITICAL_ELEMENTS) {
        HazardLevel::Critical
    } else if contains_any(HIGH_ELEMENTS) {
        HazardLevel::High
    } else if elements.len() > 2 {
        HazardLevel::Medium
    } else {
        HazardLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critical_elements_win() {
        assert_eq!(hazard_level(&["Cobalt", "Mercury"]), HazardLevel::Critical);
        assert_eq!(hazard_level(&["Lead"]), HazardLevel::Critical);
    }

    #[test]
    fn test_high_elements() {
        assert_eq!(hazard_level(&["Chromium"]), HazardLevel::High);
        assert_eq!(
            hazard_level(&["Brominated Flame Retardants", "Copper"]),
            HazardLevel::High
        );
    }

    #[test]
    fn test_count_based_levels() {
        assert_eq!(
            hazard_level(&["Lithium", "Cobalt", "Nickel"]),
            HazardLevel::Medium
        );
        assert_eq!(hazard_level(&["Lithium", "Cobalt"]), HazardLevel::Low);
        assert_eq!(hazard_level::<&str>(&[]), HazardLevel::Low);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(hazard_level(&["mercury"]), HazardLevel::Low);
    }

    #[test]
    fn test_accepts_owned_strings() {
        let elements = vec!["Cadmium".to_owned()];
        assert_eq!(hazard_level(&elements), HazardLevel::Critical);
    }
}
