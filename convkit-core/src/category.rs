//! Conversion categories and their unit lists

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::ConvertError;

const CURRENCY_UNITS: [&str; 4] = ["IDR", "USD", "EUR", "JPY"];
const LENGTH_UNITS: [&str; 4] = ["mm", "cm", "m", "km"];
const SPEED_UNITS: [&str; 2] = ["km/h", "mp/h"];

/// One of the independent conversion domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Currency,
    Length,
    Speed,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 3] = [Category::Currency, Category::Length, Category::Speed];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Currency => "Currency",
            Category::Length => "Length",
            Category::Speed => "Speed",
        }
    }

    /// Ordered unit labels valid in this category
    pub fn units(&self) -> &'static [&'static str] {
        match self {
            Category::Currency => &CURRENCY_UNITS,
            Category::Length => &LENGTH_UNITS,
            Category::Speed => &SPEED_UNITS,
        }
    }

    /// Initial (from, to) selection: the first two units of the list
    pub fn default_pair(&self) -> (&'static str, &'static str) {
        let units = self.units();
        (units[0], units[1])
    }

    /// Check whether a unit label belongs to this category (case-sensitive)
    pub fn contains(&self, unit: &str) -> bool {
        self.units().contains(&unit)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConvertError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Currency", "Length", "Speed"]);
    }

    #[test]
    fn test_default_pairs() {
        assert_eq!(Category::Currency.default_pair(), ("IDR", "USD"));
        assert_eq!(Category::Length.default_pair(), ("mm", "cm"));
        assert_eq!(Category::Speed.default_pair(), ("km/h", "mp/h"));
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("length".parse::<Category>().unwrap(), Category::Length);
        assert_eq!(" SPEED ".parse::<Category>().unwrap(), Category::Speed);
        assert_eq!("Currency".parse::<Category>().unwrap(), Category::Currency);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "mass".parse::<Category>().unwrap_err();
        assert!(matches!(err, ConvertError::UnknownCategory(ref s) if s == "mass"));
    }

    #[test]
    fn test_contains() {
        assert!(Category::Currency.contains("JPY"));
        assert!(!Category::Currency.contains("jpy"));
        assert!(!Category::Length.contains("km/h"));
        assert!(Category::Speed.contains("mp/h"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Category::Speed).unwrap();
        assert_eq!(json, "\"speed\"");
        let back: Category = serde_json::from_str("\"currency\"").unwrap();
        assert_eq!(back, Category::Currency);
    }
}
