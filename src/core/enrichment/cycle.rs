//! One poll cycle for one device.
//!
//! Every derived quantity is computed at most once per cycle, on first use,
//! and dropped together with the cycle.

use std::collections::BTreeMap;

use log::debug;
use once_cell::sync::OnceCell;

use super::emitter::{emit, EnrichmentPayload, EnrichmentSink};
use super::evaluator::{evaluate_groups, MetricsSnapshot, PolledValues};
use super::metrics_groups::{assemble_metrics_groups, MetricGroupSpec};
use super::oid_map::{build_oid_map, InventoryView, OidMap, OidMapOptions};
use crate::core::config::PluginConfig;
use crate::core::inventory::{
    build_catalog, classify_cpus, classify_fans, classify_memory, classify_power_modules,
    classify_temperatures, cpu_util_oid, select_cpu_oid, CpuModule, EntityCatalog, FanModule,
    MemoryModule, PowerModule, StorageTables, TemperatureSensor,
};
use crate::core::snmp::mibs::{host_resources, juniper};
use crate::core::snmp::SnmpWalker;
use crate::error::Result;

pub const UNKNOWN_MODEL: &str = "unknown";

/// Identity and model of the polled device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceMetadata {
    pub identity: String,
    pub model: Option<String>,
}

impl DeviceMetadata {
    pub fn new<S: Into<String>>(identity: S) -> Self {
        Self {
            identity: identity.into(),
            model: None,
        }
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(UNKNOWN_MODEL)
    }
}

pub struct DeviceMetricsCycle<'a> {
    walker: &'a dyn SnmpWalker,
    config: PluginConfig,
    device: DeviceMetadata,

    entity_names: OnceCell<EntityCatalog>,
    temperature_sensors: OnceCell<BTreeMap<String, TemperatureSensor>>,
    cpus: OnceCell<BTreeMap<String, CpuModule>>,
    memory: OnceCell<BTreeMap<String, MemoryModule>>,
    fans: OnceCell<BTreeMap<String, FanModule>>,
    power_modules: OnceCell<BTreeMap<String, PowerModule>>,
    storage: OnceCell<StorageTables>,
    oid_map: OnceCell<OidMap>,
    metrics_groups: OnceCell<Vec<MetricGroupSpec>>,
}

impl<'a> DeviceMetricsCycle<'a> {
    pub fn new(walker: &'a dyn SnmpWalker, config: PluginConfig, device: DeviceMetadata) -> Self {
        Self {
            walker,
            config,
            device,
            entity_names: OnceCell::new(),
            temperature_sensors: OnceCell::new(),
            cpus: OnceCell::new(),
            memory: OnceCell::new(),
            fans: OnceCell::new(),
            power_modules: OnceCell::new(),
            storage: OnceCell::new(),
            oid_map: OnceCell::new(),
            metrics_groups: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn device(&self) -> &DeviceMetadata {
        &self.device
    }

    /// index -> name from jnxOperatingDescr
    pub fn entity_names(&self) -> Result<&EntityCatalog> {
        self.entity_names.get_or_try_init(|| {
            let varbinds = self.walker.walk(juniper::JNX_OPERATING_DESCR)?;
            let catalog = build_catalog(&varbinds);
            debug!("{}: {} entities", self.device.identity, catalog.len());
            Ok(catalog)
        })
    }

    pub fn temperature_sensors(&self) -> Result<&BTreeMap<String, TemperatureSensor>> {
        self.temperature_sensors.get_or_try_init(|| {
            let readings = self.walker.walk(juniper::JNX_OPERATING_TEMP)?;
            Ok(classify_temperatures(self.entity_names()?, &readings))
        })
    }

    pub fn cpus(&self) -> Result<&BTreeMap<String, CpuModule>> {
        self.cpus.get_or_try_init(|| {
            let oid = select_cpu_oid(self.config.polling_frequency());
            let cpu_walk = self.walker.walk(oid)?;
            Ok(classify_cpus(self.entity_names()?, &cpu_walk))
        })
    }

    pub fn memory(&self) -> Result<&BTreeMap<String, MemoryModule>> {
        self.memory.get_or_try_init(|| {
            let memory_walk = self.walker.walk(juniper::JNX_OPERATING_MEMORY)?;
            Ok(classify_memory(&memory_walk))
        })
    }

    pub fn fans(&self) -> Result<&BTreeMap<String, FanModule>> {
        self.fans
            .get_or_try_init(|| classify_fans(self.entity_names()?))
    }

    pub fn power_modules(&self) -> Result<&BTreeMap<String, PowerModule>> {
        self.power_modules
            .get_or_try_init(|| classify_power_modules(self.entity_names()?))
    }

    /// hrStorageTable join. Not walked at all while disk metrics are off.
    pub fn storage(&self) -> Result<&StorageTables> {
        self.storage.get_or_try_init(|| {
            if !self.config.include_disk_metrics_group() {
                return Ok(StorageTables::default());
            }

            let descriptions = self.walker.walk(host_resources::HR_STORAGE_DESCR)?;
            let types = self.walker.walk(host_resources::HR_STORAGE_TYPE)?;
            let allocation_units = self.walker.walk(host_resources::HR_STORAGE_ALLOCATION_UNITS)?;
            let sizes = self.walker.walk(host_resources::HR_STORAGE_SIZE)?;

            Ok(StorageTables::from_walks(
                &descriptions,
                &types,
                &allocation_units,
                &sizes,
            ))
        })
    }

    pub fn inventory(&self) -> Result<InventoryView<'_>> {
        Ok(InventoryView {
            temperatures: self.temperature_sensors()?,
            cpus: self.cpus()?,
            memory: self.memory()?,
            fans: self.fans()?,
            power_modules: self.power_modules()?,
            storage: self.storage()?,
        })
    }

    pub fn oid_map(&self) -> Result<&OidMap> {
        self.oid_map.get_or_try_init(|| {
            let options = OidMapOptions {
                cpu_util_oid: cpu_util_oid(self.config.polling_frequency(), self.device.model())
                    .to_string(),
                include_disk_metrics_group: self.config.include_disk_metrics_group(),
            };
            Ok(build_oid_map(&self.inventory()?, &options))
        })
    }

    pub fn metrics_groups(&self) -> Result<&Vec<MetricGroupSpec>> {
        self.metrics_groups.get_or_try_init(|| {
            Ok(assemble_metrics_groups(
                &self.inventory()?,
                self.config.include_disk_metrics_group(),
            ))
        })
    }

    /// Build the schema and hand it to `sink`. Only walk errors are returned.
    pub fn get_enrichment(&self, sink: &dyn EnrichmentSink) -> Result<EnrichmentPayload> {
        let oids = self.oid_map()?.clone();
        let metrics_groups = self.metrics_groups()?.clone();
        Ok(emit(&self.device.identity, oids, metrics_groups, sink))
    }

    /// Resolve the walk fields of the OID map and evaluate every group
    pub fn poll(&self) -> Result<MetricsSnapshot> {
        let polled = PolledValues::collect(self.oid_map()?, self.walker)?;
        let records = evaluate_groups(self.metrics_groups()?, &polled);
        debug!("{}: {} metric records", self.device.identity, records.len());
        Ok(MetricsSnapshot::new(records))
    }
}
