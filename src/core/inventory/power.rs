use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::patterns::PatternSet;
use super::types::{EntityCatalog, PowerModule, PowerModuleType};
use crate::error::{EnrichError, Result};

/// Power module naming schemes and the canonical class each one maps to
pub const POWER_MODULE_TYPES: [(&str, PowerModuleType); 6] = [
    (r"PDM \d{1,2}$", PowerModuleType::PDM),
    ("PEM", PowerModuleType::PEM),
    (r"PSM \d{1,2}$", PowerModuleType::PSM),
    (r"Power Supply \d$", PowerModuleType::PEM),
    (r"Power Supply: Power Supply \d+ @", PowerModuleType::PEM),
    (r"node\d PEM \d", PowerModuleType::PEM),
];

static POWER_PATTERNS: Lazy<std::result::Result<PatternSet<PowerModuleType>, regex::Error>> =
    Lazy::new(|| PatternSet::new(POWER_MODULE_TYPES.iter().copied()));

/// Catalog entries naming a power module, with their canonical type
pub fn classify_power_modules(catalog: &EntityCatalog) -> Result<BTreeMap<String, PowerModule>> {
    let patterns = POWER_PATTERNS
        .as_ref()
        .map_err(|e| EnrichError::Pattern(e.clone()))?;

    Ok(catalog
        .iter()
        .filter_map(|(index, name)| {
            patterns.first_match(name).map(|module_type| {
                (
                    index.clone(),
                    PowerModule {
                        index: index.clone(),
                        name: name.clone(),
                        module_type: *module_type,
                    },
                )
            })
        })
        .collect())
}

/// Number of classified modules per type
pub fn power_type_histogram(
    modules: &BTreeMap<String, PowerModule>,
) -> BTreeMap<PowerModuleType, i64> {
    let mut histogram = BTreeMap::new();
    for module in modules.values() {
        *histogram.entry(module.module_type).or_insert(0) += 1;
    }
    histogram
}
