//! Static rate tables

use std::sync::LazyLock;
use serde::Serialize;
use tracing::debug;

/// 1 km/h expressed in mp/h
pub const KMH_TO_MPH: f64 = 0.621371;

/// Currency rates: units of each currency per 1 IDR
pub static CURRENCY_RATES: LazyLock<RateTable> = LazyLock::new(|| {
    RateTable::new("IDR")
        .with("IDR", 1.0)
        .with("USD", 0.000064)
        .with("EUR", 0.000059)
        .with("JPY", 0.0097)
});

/// Length factors: millimetres per unit
pub static LENGTH_FACTORS: LazyLock<RateTable> = LazyLock::new(|| {
    RateTable::new("mm")
        .with("mm", 1.0)
        .with("cm", 10.0)
        .with("m", 1000.0)
        .with("km", 1_000_000.0)
});

/// Ordered unit -> factor mapping relative to a base unit
#[derive(Debug, Clone, Serialize)]
pub struct RateTable {
    base: &'static str,
    entries: Vec<(&'static str, f64)>,
}

impl RateTable {
    pub fn new(base: &'static str) -> Self {
        Self { base, entries: Vec::new() }
    }

    pub fn with(mut self, unit: &'static str, factor: f64) -> Self {
        self.entries.push((unit, factor));
        self
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    /// Factor for a unit, if the table knows it
    pub fn get(&self, unit: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, factor)| *factor)
    }

    /// Factor for a unit; unknown units are neutral (1.0) rather than an error
    pub fn factor(&self, unit: &str) -> f64 {
        self.get(unit).unwrap_or_else(|| {
            debug!(unit, base = self.base, "unknown unit, using neutral rate 1.0");
            1.0
        })
    }

    pub fn units(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(u, _)| *u)
    }
}
