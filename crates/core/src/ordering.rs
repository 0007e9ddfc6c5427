use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, NormalizedDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Incomparable {
    /// One or both dates were not found.
    Missing,
    /// One or both tokens failed every normalization template.
    Unparseable,
}

/// Chronological relationship between a manufacturing and an expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrdering {
    /// Expiry is strictly later than manufacturing.
    Chronological,
    /// Expiry is on or before manufacturing.
    Violated,
    Incomparable(Incomparable),
}

impl DateOrdering {
    pub fn between(manufactured: &NormalizedDate, expires: &NormalizedDate) -> Self {
        match (manufactured.as_date(), expires.as_date()) {
            (Some(m), Some(e)) if e > m => DateOrdering::Chronological,
            (Some(_), Some(_)) => DateOrdering::Violated,
            _ => DateOrdering::Incomparable(Incomparable::Unparseable),
        }
    }

    /// Fail-open acceptance: only a proven violation is rejected. Missing or
    /// unparseable dates never block an extraction.
    pub fn permits(self) -> bool {
        !matches!(self, DateOrdering::Violated)
    }
}

/// Compare two raw tokens after normalizing both.
pub fn check_ordering(manufactured: Option<&str>, expires: Option<&str>) -> DateOrdering {
    match (manufactured, expires) {
        (Some(m), Some(e)) => DateOrdering::between(&normalize(m), &normalize(e)),
        _ => DateOrdering::Incomparable(Incomparable::Missing),
    }
}

/// `true` unless both tokens normalize and expiry is not strictly later.
pub fn ordering_valid(manufactured: Option<&str>, expires: Option<&str>) -> bool {
    check_ordering(manufactured, expires).permits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_expiry_is_chronological() {
        assert_eq!(
            check_ordering(Some("01-01-2023"), Some("01-06-2023")),
            DateOrdering::Chronological
        );
        assert!(ordering_valid(Some("01-01-2023"), Some("01-06-2023")));
    }

    #[test]
    fn earlier_expiry_is_violated() {
        assert_eq!(
            check_ordering(Some("01-06-2023"), Some("01-01-2023")),
            DateOrdering::Violated
        );
        assert!(!ordering_valid(Some("01-06-2023"), Some("01-01-2023")));
    }

    #[test]
    fn same_day_is_violated() {
        assert!(!ordering_valid(Some("15-JAN-2024"), Some("15/01/2024")));
    }

    #[test]
    fn missing_date_permits() {
        assert_eq!(
            check_ordering(None, Some("01-01-2023")),
            DateOrdering::Incomparable(Incomparable::Missing)
        );
        assert!(ordering_valid(Some("01-01-2023"), None));
        assert!(ordering_valid(None, None));
    }

    #[test]
    fn unparseable_date_permits() {
        assert_eq!(
            check_ordering(Some("31-02-2024"), Some("01-01-2020")),
            DateOrdering::Incomparable(Incomparable::Unparseable)
        );
        assert!(ordering_valid(Some("01-01-2024"), Some("99-99-9999")));
    }

    #[test]
    fn mixed_shapes_compare_as_dates() {
        assert!(ordering_valid(Some("MAR 2024"), Some("15.03.2024")));
        assert!(!ordering_valid(Some("15.03.2024"), Some("MAR 2024")));
    }
}
