//! Conversion entry points

use serde::{Deserialize, Serialize};
use tracing::debug;
use convkit_core::{parse_amount, Category, ConvertError};
use crate::registry::REGISTRY;

/// A conversion as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: Category,
    /// Amount exactly as typed; empty means nothing to convert yet
    pub amount: String,
    pub from: String,
    pub to: String,
}

/// Display-ready outcome of a conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub category: Category,
    pub from: String,
    pub to: String,
    /// Unformatted numeric result
    pub value: f64,
    /// Formatted per the category's display policy
    pub text: String,
}

impl ConversionRequest {
    pub fn new(category: Category, amount: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            category,
            amount: amount.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Request using the category's default (from, to) units
    pub fn with_defaults(category: Category, amount: impl Into<String>) -> Self {
        let (from, to) = category.default_pair();
        Self::new(category, amount, from, to)
    }

    /// Check that both units belong to the category.
    ///
    /// `execute` does not require this; unknown units fall back to a neutral rate.
    pub fn validate(&self) -> Result<(), ConvertError> {
        for unit in [&self.from, &self.to] {
            if !self.category.contains(unit) {
                return Err(ConvertError::UnitNotInCategory {
                    unit: unit.clone(),
                    category: self.category,
                });
            }
        }
        Ok(())
    }

    pub fn execute(&self) -> Option<ConversionResult> {
        convert(self.category, &self.amount, &self.from, &self.to)
    }
}

/// Convert `amount_text` from one unit to another within `category`.
///
/// Returns `None` when the amount is empty. Never fails otherwise.
pub fn convert(category: Category, amount_text: &str, from: &str, to: &str) -> Option<ConversionResult> {
    let amount = parse_amount(amount_text)?;
    let spec = REGISTRY.get(category);

    let value = spec.rule.apply(amount, from, to);
    let text = spec.format.render(value);

    debug!(%category, amount, from, to, value, text = %text, "converted");

    Some(ConversionResult {
        category,
        from: from.to_string(),
        to: to.to_string(),
        value,
        text,
    })
}

pub fn convert_currency(amount_text: &str, from_currency: &str, to_currency: &str) -> Option<String> {
    convert(Category::Currency, amount_text, from_currency, to_currency).map(|r| r.text)
}

pub fn convert_length(amount_text: &str, from_unit: &str, to_unit: &str) -> Option<String> {
    convert(Category::Length, amount_text, from_unit, to_unit).map(|r| r.text)
}

pub fn convert_speed(amount_text: &str, from_unit: &str, to_unit: &str) -> Option<String> {
    convert(Category::Speed, amount_text, from_unit, to_unit).map(|r| r.text)
}
