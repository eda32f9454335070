//! Conversion rules, one per category

use crate::tables::RateTable;

/// Arithmetic applied to an amount for a (from, to) unit pair
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Table holds "units per 1 base unit": multiply out of the base,
    /// divide into it
    PerBase(&'static RateTable),
    /// Table holds "base units per unit": scale into the base, then out
    ToBase(&'static RateTable),
    /// Only the two named units convert; any other pair passes through
    Ratio {
        from: &'static str,
        to: &'static str,
        ratio: f64,
    },
}

impl Rule {
    pub fn apply(&self, amount: f64, from: &str, to: &str) -> f64 {
        match *self {
            Rule::PerBase(table) => {
                if from == table.base() {
                    amount * table.factor(to)
                } else if to == table.base() {
                    amount / table.factor(from)
                } else {
                    (amount / table.factor(from)) * table.factor(to)
                }
            }
            Rule::ToBase(table) => amount * table.factor(from) / table.factor(to),
            Rule::Ratio { from: a, to: b, ratio } => {
                if from == a && to == b {
                    amount * ratio
                } else if from == b && to == a {
                    amount / ratio
                } else {
                    amount
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{CURRENCY_RATES, KMH_TO_MPH, LENGTH_FACTORS};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_per_base_cases() {
        let rule = Rule::PerBase(&CURRENCY_RATES);
        assert!(close(rule.apply(1_000_000.0, "IDR", "USD"), 64.0));
        assert!(close(rule.apply(64.0, "USD", "IDR"), 1_000_000.0));
        assert!(close(rule.apply(1.0, "USD", "JPY"), 0.0097 / 0.000064));
    }

    #[test]
    fn test_to_base() {
        let rule = Rule::ToBase(&LENGTH_FACTORS);
        assert_eq!(rule.apply(1.0, "km", "mm"), 1_000_000.0);
        assert_eq!(rule.apply(5.0, "cm", "m"), 0.05);
        assert_eq!(rule.apply(3.0, "m", "m"), 3.0);
    }

    #[test]
    fn test_ratio_pass_through() {
        let rule = Rule::Ratio { from: "km/h", to: "mp/h", ratio: KMH_TO_MPH };
        assert!(close(rule.apply(100.0, "km/h", "mp/h"), 62.1371));
        assert!(close(rule.apply(62.1371, "mp/h", "km/h"), 100.0));
        assert_eq!(rule.apply(100.0, "km/h", "km/h"), 100.0);
        assert_eq!(rule.apply(100.0, "knots", "mp/h"), 100.0);
    }
}
