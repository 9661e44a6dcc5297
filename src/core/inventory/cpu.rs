use std::collections::BTreeMap;

use log::debug;

use super::types::{CpuModule, EntityCatalog};
use crate::core::snmp::Varbind;

/// Name fragments (lowercase) identifying components that carry a CPU
pub const CPU_ROLE_KEYWORDS: [&str; 6] = ["routing engine", "fpc", "fpm", "cp", "pic", "fbc"];

/// Keyword matched by `name`, if any. Keywords are tried in order.
pub fn cpu_role_keyword(name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    CPU_ROLE_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| lowered.contains(keyword))
}

/// Select the CPU-bearing entities among the indices of a CPU utilization walk.
///
/// Only the index of each varbind matters here; utilization values are
/// sampled again every cycle through the `cpu_util` field.
pub fn classify_cpus(catalog: &EntityCatalog, cpu_walk: &[Varbind]) -> BTreeMap<String, CpuModule> {
    let mut cpus = BTreeMap::new();

    for varbind in cpu_walk {
        let Some(name) = catalog.get(&varbind.index) else {
            debug!("cpu index {} has no entity description", varbind.index);
            continue;
        };

        if cpu_role_keyword(name).is_some() {
            cpus.insert(
                varbind.index.clone(),
                CpuModule {
                    index: varbind.index.clone(),
                    cpu_name: name.clone(),
                    cpu_label: format!("Module {}", varbind.index),
                },
            );
        }
    }

    cpus
}
