//! Hardware inventory discovery.
//!
//! Every classifier here is a pure function of walk results: the entity
//! catalog plus, for some components, one dedicated subtree. Walking is the
//! caller's job (see `enrichment::DeviceMetricsCycle`).

pub mod catalog;
pub mod cpu;
pub mod fans;
pub mod interval;
pub mod memory;
mod patterns;
pub mod power;
pub mod storage;
pub mod temperature;
pub mod types;

pub use catalog::build_catalog;
pub use cpu::classify_cpus;
pub use fans::classify_fans;
pub use interval::{cpu_util_oid, select_cpu_oid};
pub use memory::{classify_memory, memory_totals};
pub use patterns::PatternSet;
pub use power::{classify_power_modules, power_type_histogram};
pub use storage::StorageTables;
pub use temperature::classify_temperatures;
pub use types::*;
