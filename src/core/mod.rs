// Core business logic module

pub mod config;
pub mod enrichment;
pub mod inventory;
pub mod snmp;

// Re-export commonly used items
pub use config::PluginConfig;
pub use enrichment::{DeviceMetricsCycle, EnrichmentPayload};
pub use inventory::select_cpu_oid;
pub use snmp::{SnapshotWalker, SnmpWalker, WalkSnapshot};
