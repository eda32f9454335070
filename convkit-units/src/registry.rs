//! Per-category specifications keyed by `Category`

use std::collections::HashMap;
use std::sync::LazyLock;
use convkit_core::{Category, FormatPolicy};
use crate::rules::Rule;
use crate::tables::{CURRENCY_RATES, KMH_TO_MPH, LENGTH_FACTORS};

/// Global converter registry
pub static REGISTRY: LazyLock<ConverterRegistry> = LazyLock::new(ConverterRegistry::new);

/// Everything needed to convert within one category
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub rule: Rule,
    pub format: FormatPolicy,
}

impl CategorySpec {
    pub fn units(&self) -> &'static [&'static str] {
        self.category.units()
    }

    pub fn default_pair(&self) -> (&'static str, &'static str) {
        self.category.default_pair()
    }
}

/// Registry of the three category specifications
pub struct ConverterRegistry {
    specs: HashMap<Category, CategorySpec>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        let mut registry = ConverterRegistry { specs: HashMap::new() };
        registry.register(CategorySpec {
            category: Category::Currency,
            rule: Rule::PerBase(&CURRENCY_RATES),
            format: FormatPolicy::Fixed { decimals: 4 },
        });
        registry.register(CategorySpec {
            category: Category::Length,
            rule: Rule::ToBase(&LENGTH_FACTORS),
            format: FormatPolicy::Adaptive {
                decimals: 4,
                scientific_decimals: 6,
                upper: 1000.0,
                lower: 0.01,
            },
        });
        registry.register(CategorySpec {
            category: Category::Speed,
            rule: Rule::Ratio { from: "km/h", to: "mp/h", ratio: KMH_TO_MPH },
            format: FormatPolicy::Fixed { decimals: 2 },
        });
        registry
    }

    fn register(&mut self, spec: CategorySpec) {
        self.specs.insert(spec.category, spec);
    }

    pub fn get(&self, category: Category) -> &CategorySpec {
        // every Category variant is registered in new()
        &self.specs[&category]
    }

    /// Specs in display order
    pub fn all(&self) -> impl Iterator<Item = &CategorySpec> + '_ {
        Category::ALL.into_iter().map(move |c| self.get(c))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_registered() {
        let reg = ConverterRegistry::new();
        for category in Category::ALL {
            assert_eq!(reg.get(category).category, category);
        }
        assert_eq!(reg.all().count(), 3);
    }

    #[test]
    fn test_format_policies() {
        assert_eq!(REGISTRY.get(Category::Currency).format, FormatPolicy::Fixed { decimals: 4 });
        assert_eq!(REGISTRY.get(Category::Speed).format, FormatPolicy::Fixed { decimals: 2 });
        assert!(matches!(REGISTRY.get(Category::Length).format, FormatPolicy::Adaptive { .. }));
    }

    #[test]
    fn test_spec_units() {
        let spec = REGISTRY.get(Category::Speed);
        assert_eq!(spec.units(), &["km/h", "mp/h"]);
        assert_eq!(spec.default_pair(), ("km/h", "mp/h"));
    }
}
