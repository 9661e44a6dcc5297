use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// index -> entity description, from jnxOperatingDescr
pub type EntityCatalog = BTreeMap<String, String>;

/// Temperature sensor with a plausible reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureSensor {
    pub index: String,
    pub sensor_name: String,
    pub raw_value: i64, // Celsius
}

/// Routing engine or line-card CPU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuModule {
    pub index: String,
    pub cpu_name: String,
    pub cpu_label: String, // "Module <index>"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryModule {
    pub index: String,
    pub total_bytes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanModule {
    pub index: String,
    pub name: String,
}

/// Canonical power module class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerModuleType {
    PDM,
    PEM,
    PSM,
}

impl PowerModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerModuleType::PDM => "PDM",
            PowerModuleType::PEM => "PEM",
            PowerModuleType::PSM => "PSM",
        }
    }
}

impl fmt::Display for PowerModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerModule {
    pub index: String,
    pub name: String,
    pub module_type: PowerModuleType,
}

/// hrStorageType taxonomy (RFC 2790)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageType {
    Other,
    Ram,
    VirtualMemory,
    FixedDisk,
    RemovableDisk,
    FloppyDisk,
    CompactDisc,
    RamDisk,
    FlashMemory,
    NetworkDisk,
    Unknown,
}

impl StorageType {
    /// Map the last arc of an hrStorageType OID (hrStorageTypes.N)
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "1" => StorageType::Other,
            "2" => StorageType::Ram,
            "3" => StorageType::VirtualMemory,
            "4" => StorageType::FixedDisk,
            "5" => StorageType::RemovableDisk,
            "6" => StorageType::FloppyDisk,
            "7" => StorageType::CompactDisc,
            "8" => StorageType::RamDisk,
            "9" => StorageType::FlashMemory,
            "10" => StorageType::NetworkDisk,
            _ => StorageType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Other => "hrStorageOther",
            StorageType::Ram => "hrStorageRam",
            StorageType::VirtualMemory => "hrStorageVirtualMemory",
            StorageType::FixedDisk => "hrStorageFixedDisk",
            StorageType::RemovableDisk => "hrStorageRemovableDisk",
            StorageType::FloppyDisk => "hrStorageFloppyDisk",
            StorageType::CompactDisc => "hrStorageCompactDisc",
            StorageType::RamDisk => "hrStorageRamDisk",
            StorageType::FlashMemory => "hrStorageFlashMemory",
            StorageType::NetworkDisk => "hrStorageNetworkDisk",
            StorageType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// hrStorageTable row joined across its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageVolume {
    pub index: String,
    pub description: String,
    pub storage_type: StorageType,
    pub allocation_unit_bytes: Option<i64>,
    pub total_bytes: Option<i64>, // None when allocation units are missing
}
