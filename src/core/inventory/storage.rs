//! hrStorageTable discovery.
//!
//! The four columns are walked independently and joined by index. Each
//! column keeps its own index set, so a description can exist without a
//! matching size.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::types::{StorageType, StorageVolume};
use crate::core::snmp::Varbind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageTables {
    pub descriptions: BTreeMap<String, String>,
    pub types: BTreeMap<String, StorageType>,
    pub allocation_units: BTreeMap<String, i64>,
    /// size * allocation unit, only for indices with a known allocation unit
    pub total_bytes: BTreeMap<String, i64>,
}

impl StorageTables {
    pub fn from_walks(
        descriptions: &[Varbind],
        types: &[Varbind],
        allocation_units: &[Varbind],
        sizes: &[Varbind],
    ) -> Self {
        let descriptions = descriptions
            .iter()
            .map(|varbind| (varbind.index.clone(), varbind.value.to_text()))
            .collect();

        let types = types
            .iter()
            .map(|varbind| (varbind.index.clone(), parse_storage_type(&varbind.value.to_text())))
            .collect();

        let allocation_units: BTreeMap<String, i64> = allocation_units
            .iter()
            .filter_map(|varbind| numeric(varbind, "allocation unit"))
            .collect();

        let total_bytes = sizes
            .iter()
            .filter_map(|varbind| numeric(varbind, "size"))
            .filter_map(|(index, size)| {
                let unit = allocation_units.get(&index)?;
                Some((index, size.saturating_mul(*unit)))
            })
            .collect();

        Self {
            descriptions,
            types,
            allocation_units,
            total_bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// One row per described volume
    pub fn volumes(&self) -> Vec<StorageVolume> {
        self.descriptions
            .iter()
            .map(|(index, description)| StorageVolume {
                index: index.clone(),
                description: description.clone(),
                storage_type: self
                    .types
                    .get(index)
                    .copied()
                    .unwrap_or(StorageType::Unknown),
                allocation_unit_bytes: self.allocation_units.get(index).copied(),
                total_bytes: self.total_bytes.get(index).copied(),
            })
            .collect()
    }
}

/// hrStorageType values are OIDs under hrStorageTypes; the last arc is the code.
pub fn parse_storage_type(value: &str) -> StorageType {
    StorageType::from_code(value.rsplit('.').next().unwrap_or_default())
}

fn numeric(varbind: &Varbind, column: &str) -> Option<(String, i64)> {
    match varbind.value.as_i64() {
        Some(value) => Some((varbind.index.clone(), value)),
        None => {
            debug!("storage {} {} is not numeric: {}", column, varbind.index, varbind.value);
            None
        }
    }
}
