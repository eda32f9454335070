//! convkit Units - Unit Conversion Service
//!
//! Pure, stateless conversion of an amount between two units of one category.
//! Rates are hard-coded static tables; each category carries its conversion
//! rule and display format as data in the registry.
//!
//! Categories:
//! - Currency (IDR, USD, EUR, JPY) - rates relative to IDR, 4 decimals
//! - Length (mm, cm, m, km) - factors relative to mm, fixed or scientific
//! - Speed (km/h, mp/h) - single ratio, 2 decimals

mod convert;
mod registry;
mod rules;
mod tables;

pub use convert::{
    convert, convert_currency, convert_length, convert_speed,
    ConversionRequest, ConversionResult,
};
pub use registry::{CategorySpec, ConverterRegistry, REGISTRY};
pub use rules::Rule;
pub use tables::{RateTable, CURRENCY_RATES, KMH_TO_MPH, LENGTH_FACTORS};

pub use convkit_core::Category;
