use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use super::patterns::PatternSet;
use super::types::{EntityCatalog, FanModule};
use crate::error::{EnrichError, Result};

/// Fan naming schemes across Juniper platforms, most specific first.
/// QFX10000 chassis report fan trays, so their fan count is per tray.
pub const FAN_TYPES: [&str; 7] = [
    r"Fan Tray \d+ Fan \d+",
    r"Fan Tray \d+",
    r"FAN \d+",
    r"node\d SRX\d+ \w+ fan \d",
    r"node\d Fan \d",
    r"node\d \w+ Tray Fan \d+",
    r"(Top|Bottom)\s(Rear|Middle|Front)\sFan",
];

static FAN_PATTERNS: Lazy<std::result::Result<PatternSet<()>, regex::Error>> =
    Lazy::new(|| PatternSet::new(FAN_TYPES.iter().map(|pattern| (*pattern, ()))));

/// Catalog entries whose name starts like one of [`FAN_TYPES`]
pub fn classify_fans(catalog: &EntityCatalog) -> Result<BTreeMap<String, FanModule>> {
    let patterns = FAN_PATTERNS
        .as_ref()
        .map_err(|e| EnrichError::Pattern(e.clone()))?;

    Ok(catalog
        .iter()
        .filter(|(_, name)| patterns.first_match(name).is_some())
        .map(|(index, name)| {
            (
                index.clone(),
                FanModule {
                    index: index.clone(),
                    name: name.clone(),
                },
            )
        })
        .collect())
}
