use std::collections::BTreeMap;

use log::debug;

use super::types::MemoryModule;
use crate::core::snmp::Varbind;

const BYTES_PER_MEGABYTE: i64 = 1 << 20;

/// Convert a jnxOperatingMemory walk (megabytes) into byte totals.
///
/// Zero-sized entries are kept here; [`memory_totals`] is where they drop out.
pub fn classify_memory(memory_walk: &[Varbind]) -> BTreeMap<String, MemoryModule> {
    let mut memory = BTreeMap::new();

    for varbind in memory_walk {
        let Some(megabytes) = varbind.value.as_i64() else {
            debug!("memory {} is not numeric: {}", varbind.index, varbind.value);
            continue;
        };

        memory.insert(
            varbind.index.clone(),
            MemoryModule {
                index: varbind.index.clone(),
                total_bytes: megabytes.saturating_mul(BYTES_PER_MEGABYTE),
            },
        );
    }

    memory
}

/// Static `memory_total` table: every module except those reporting zero bytes.
///
/// The `memory_used` walk still reports the zero-sized indices, so consumers
/// may see used values with no matching total.
pub fn memory_totals(memory: &BTreeMap<String, MemoryModule>) -> BTreeMap<String, i64> {
    memory
        .values()
        .filter(|module| module.total_bytes != 0)
        .map(|module| (module.index.clone(), module.total_bytes))
        .collect()
}
