//! The OID map: every field a metrics group may reference.
//!
//! A field is either a static per-index table computed at discovery time, or a
//! subtree to walk again on every poll.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::inventory::{
    memory_totals, power_type_histogram, CpuModule, FanModule, MemoryModule, PowerModule,
    StorageTables, TemperatureSensor,
};
use crate::core::snmp::mibs::{host_resources, juniper};
use crate::core::snmp::SnmpValue;

/// A value stored in a static table or produced by evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(value.into())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<SnmpValue> for FieldValue {
    fn from(value: SnmpValue) -> Self {
        match value {
            SnmpValue::Integer(v) => FieldValue::Integer(v),
            SnmpValue::Counter(v) => match i64::try_from(v) {
                Ok(v) => FieldValue::Integer(v),
                Err(_) => FieldValue::Text(v.to_string()),
            },
            other => FieldValue::Text(other.to_text()),
        }
    }
}

/// How a field is obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum OidMapEntry {
    Static { values: BTreeMap<String, FieldValue> },
    BulkWalk { oid: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OidMap {
    fields: BTreeMap<String, OidMapEntry>,
}

impl OidMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_static<N, I, K, V>(&mut self, name: N, values: I)
    where
        N: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.fields.insert(name.into(), OidMapEntry::Static { values });
    }

    pub fn insert_walk<N: Into<String>, O: Into<String>>(&mut self, name: N, oid: O) {
        self.fields
            .insert(name.into(), OidMapEntry::BulkWalk { oid: oid.into() });
    }

    pub fn get(&self, name: &str) -> Option<&OidMapEntry> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Values of a static field; `None` for walk fields and unknown names
    pub fn static_values(&self, name: &str) -> Option<&BTreeMap<String, FieldValue>> {
        match self.fields.get(name)? {
            OidMapEntry::Static { values } => Some(values),
            OidMapEntry::BulkWalk { .. } => None,
        }
    }

    pub fn walk_oid(&self, name: &str) -> Option<&str> {
        match self.fields.get(name)? {
            OidMapEntry::BulkWalk { oid } => Some(oid.as_str()),
            OidMapEntry::Static { .. } => None,
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OidMapEntry)> {
        self.fields.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Map every power module type onto itself, so that a type used as a
    /// dimension key also resolves through `power_module_types`.
    fn add_power_module_types_mapping(&mut self) {
        if let Some(OidMapEntry::Static { values }) = self.fields.get_mut(POWER_MODULE_TYPES) {
            let identity: Vec<(String, FieldValue)> = values
                .values()
                .map(|value| (value.to_string(), value.clone()))
                .collect();
            values.extend(identity);
        }
    }
}

pub const POWER_MODULE_TYPES: &str = "power_module_types";

/// Classifier outputs the OID map is built from
#[derive(Debug, Clone, Copy)]
pub struct InventoryView<'a> {
    pub temperatures: &'a BTreeMap<String, TemperatureSensor>,
    pub cpus: &'a BTreeMap<String, CpuModule>,
    pub memory: &'a BTreeMap<String, MemoryModule>,
    pub fans: &'a BTreeMap<String, FanModule>,
    pub power_modules: &'a BTreeMap<String, PowerModule>,
    pub storage: &'a StorageTables,
}

#[derive(Debug, Clone)]
pub struct OidMapOptions {
    /// Subtree sampled for `cpu_util`
    pub cpu_util_oid: String,
    pub include_disk_metrics_group: bool,
}

/// Assemble the OID map for one poll cycle
pub fn build_oid_map(inventory: &InventoryView<'_>, options: &OidMapOptions) -> OidMap {
    let mut map = OidMap::new();

    map.insert_static(
        "cpu_name",
        inventory
            .cpus
            .iter()
            .map(|(index, cpu)| (index.clone(), cpu.cpu_name.clone())),
    );
    map.insert_static(
        "cpu_no",
        inventory
            .cpus
            .iter()
            .map(|(index, cpu)| (index.clone(), cpu.cpu_label.clone())),
    );
    map.insert_walk("cpu_util", options.cpu_util_oid.clone());

    map.insert_walk("memory_used", juniper::JNX_OPERATING_BUFFER);
    map.insert_static("memory_total", memory_totals(inventory.memory));

    map.insert_walk("oper_status", juniper::JNX_OPERATING_STATE);

    map.insert_static(
        "fans",
        inventory
            .fans
            .iter()
            .map(|(index, fan)| (index.clone(), fan.name.clone())),
    );

    map.insert_static(
        "power_modules",
        inventory
            .power_modules
            .iter()
            .map(|(index, module)| (index.clone(), module.name.clone())),
    );
    map.insert_static(
        POWER_MODULE_TYPES,
        inventory
            .power_modules
            .iter()
            .map(|(index, module)| (index.clone(), module.module_type.as_str())),
    );
    map.insert_static(
        "power_units_total",
        power_type_histogram(inventory.power_modules)
            .into_iter()
            .map(|(module_type, count)| (module_type.as_str(), count)),
    );

    map.insert_walk("temp_sensor_values", juniper::JNX_OPERATING_TEMP);
    map.insert_static(
        "temp_sensor_name",
        inventory
            .temperatures
            .iter()
            .map(|(index, sensor)| (index.clone(), sensor.sensor_name.clone())),
    );

    if options.include_disk_metrics_group {
        let storage = inventory.storage;
        map.insert_static("storage_description", storage.descriptions.clone());
        map.insert_static(
            "storage_type",
            storage
                .types
                .iter()
                .map(|(index, storage_type)| (index.clone(), storage_type.as_str())),
        );
        map.insert_walk(
            "storage_allocation_failures",
            host_resources::HR_STORAGE_ALLOCATION_FAILURES,
        );
        map.insert_static("storage_allocation_units", storage.allocation_units.clone());
        map.insert_walk("storage_used_bytes", host_resources::HR_STORAGE_USED);
        map.insert_static("storage_total_bytes", storage.total_bytes.clone());
    }

    map.add_power_module_types_mapping();
    map
}
