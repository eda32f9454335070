//! Display formatting for conversion results

use serde::{Deserialize, Serialize};

/// How a category renders its numeric result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum FormatPolicy {
    /// Fixed-point with a set number of decimals, never exponential
    Fixed { decimals: usize },
    /// Fixed-point inside `[lower, upper)` by magnitude, scientific outside it
    Adaptive {
        decimals: usize,
        scientific_decimals: usize,
        upper: f64,
        lower: f64,
    },
}

impl FormatPolicy {
    pub fn render(&self, value: f64) -> String {
        match *self {
            FormatPolicy::Fixed { decimals } => format_fixed(value, decimals),
            FormatPolicy::Adaptive { decimals, scientific_decimals, upper, lower } => {
                let magnitude = value.abs();
                if magnitude >= upper || magnitude < lower {
                    format_scientific(value, scientific_decimals)
                } else {
                    format_fixed(value, decimals)
                }
            }
        }
    }
}

/// Fixed-point notation with exactly `decimals` digits after the point
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Scientific notation as `d.dddddde+XX`: signed exponent, at least two digits
pub fn format_scientific(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Rust renders "1.000000e6"; split off the exponent and re-pad it
    let raw = format!("{:.*e}", decimals, value);
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
        }
        None => raw,
    }
}
