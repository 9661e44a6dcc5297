//! CPU utilization OID selection by poll interval.

use crate::core::snmp::mibs::juniper;

/// Device models whose averaged CPU columns are unusable; the instantaneous
/// jnxOperatingCPU column is walked instead.
pub const INSTANT_CPU_MODEL_MARKER: &str = "EX4300";

/// Pick the averaged-CPU column matching the poll interval.
///
/// - `5 <= p < 300`   -> 1 minute average
/// - `300 <= p < 900` -> 5 minute average
/// - `p >= 900`       -> 15 minute average
/// - anything else    -> 1 minute average
pub fn select_cpu_oid(poll_seconds: i64) -> &'static str {
    match poll_seconds {
        5..=299 => juniper::JNX_OPERATING_1MIN_AVG_CPU,
        300..=899 => juniper::JNX_OPERATING_5MIN_AVG_CPU,
        p if p >= 900 => juniper::JNX_OPERATING_15MIN_AVG_CPU,
        _ => juniper::JNX_OPERATING_1MIN_AVG_CPU,
    }
}

/// OID walked every cycle for the `cpu_util` field
pub fn cpu_util_oid(poll_seconds: i64, model: &str) -> &'static str {
    if model.contains(INSTANT_CPU_MODEL_MARKER) {
        juniper::JNX_OPERATING_CPU
    } else {
        select_cpu_oid(poll_seconds)
    }
}
