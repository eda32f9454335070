//! Errors for callers that opt into strictness
//!
//! The conversion itself never fails. These errors only surface when a caller
//! names a category by text or asks for unit membership to be enforced.

use thiserror::Error;
use crate::Category;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNIT_NOT_IN_CATEGORY: &str = "UNIT_NOT_IN_CATEGORY";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unit '{unit}' is not a {category} unit")]
    UnitNotInCategory { unit: String, category: Category },
}

impl ConvertError {
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
            ConvertError::UnitNotInCategory { .. } => codes::UNIT_NOT_IN_CATEGORY,
        }
    }

    /// Hint listing what would have been accepted
    pub fn suggestion(&self) -> String {
        match self {
            ConvertError::UnknownCategory(_) => {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
                format!("Use one of: {}", names.join(", "))
            }
            ConvertError::UnitNotInCategory { category, .. } => {
                format!("Use one of: {}", category.units().join(", "))
            }
        }
    }
}
