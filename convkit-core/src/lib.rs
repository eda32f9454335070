//! convkit Core - shared vocabulary for the conversion service
//!
//! Contains:
//! - `Category`: the closed set of conversion domains and their unit lists
//! - Amount parsing (free-form text to a number, never failing)
//! - Display formatting policies (fixed-point and adaptive scientific)
//! - `ConvertError`: the few failures callers can opt into

mod amount;
mod category;
mod error;
mod format;

pub use amount::parse_amount;
pub use category::Category;
pub use error::{codes, ConvertError};
pub use format::{format_fixed, format_scientific, FormatPolicy};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{parse_amount, Category, ConvertError, FormatPolicy};
}
