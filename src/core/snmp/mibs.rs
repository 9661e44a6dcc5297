//! OIDs walked by the engine.

/// JUNIPER-MIB jnxOperatingTable columns (1.3.6.1.4.1.2636.3.1.13.1)
pub mod juniper {
    pub const JNX_OPERATING_DESCR: &str = ".1.3.6.1.4.1.2636.3.1.13.1.5";
    pub const JNX_OPERATING_STATE: &str = ".1.3.6.1.4.1.2636.3.1.13.1.6";
    pub const JNX_OPERATING_TEMP: &str = ".1.3.6.1.4.1.2636.3.1.13.1.7";
    pub const JNX_OPERATING_CPU: &str = ".1.3.6.1.4.1.2636.3.1.13.1.8";
    pub const JNX_OPERATING_BUFFER: &str = ".1.3.6.1.4.1.2636.3.1.13.1.11";
    pub const JNX_OPERATING_MEMORY: &str = ".1.3.6.1.4.1.2636.3.1.13.1.15";
    pub const JNX_OPERATING_1MIN_AVG_CPU: &str = ".1.3.6.1.4.1.2636.3.1.13.1.20";
    pub const JNX_OPERATING_5MIN_AVG_CPU: &str = ".1.3.6.1.4.1.2636.3.1.13.1.21";
    pub const JNX_OPERATING_15MIN_AVG_CPU: &str = ".1.3.6.1.4.1.2636.3.1.13.1.22";

    /// jnxOperatingState value reported by a component that is down
    pub const OPER_STATE_DOWN: i64 = 6;
}

/// HOST-RESOURCES-MIB hrStorageTable columns (1.3.6.1.2.1.25.2.3.1)
pub mod host_resources {
    pub const HR_STORAGE_TYPE: &str = ".1.3.6.1.2.1.25.2.3.1.2";
    pub const HR_STORAGE_DESCR: &str = ".1.3.6.1.2.1.25.2.3.1.3";
    pub const HR_STORAGE_ALLOCATION_UNITS: &str = ".1.3.6.1.2.1.25.2.3.1.4";
    pub const HR_STORAGE_SIZE: &str = ".1.3.6.1.2.1.25.2.3.1.5";
    pub const HR_STORAGE_USED: &str = ".1.3.6.1.2.1.25.2.3.1.6";
    pub const HR_STORAGE_ALLOCATION_FAILURES: &str = ".1.3.6.1.2.1.25.2.3.1.7";
}
