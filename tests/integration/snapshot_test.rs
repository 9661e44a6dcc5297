use std::fs;

use jnx_enrich::core::enrichment::{DeviceMetadata, DeviceMetricsCycle};
use jnx_enrich::core::snmp::mibs::juniper;
use jnx_enrich::core::snmp::{SnapshotWalker, SnmpWalker, WalkSnapshot};
use jnx_enrich::PluginConfig;
use tempfile::TempDir;

use super::common::four_entity_snapshot;

#[test]
fn test_snapshot_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mx480.json");
    let snapshot = four_entity_snapshot();
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

    let loaded = WalkSnapshot::load(&path).unwrap();
    assert_eq!(loaded, snapshot);
}

#[test]
fn test_hand_written_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ex.json");
    fs::write(
        &path,
        r#"{
            "1.3.6.1.4.1.2636.3.1.13.1.5": [
                {"index": "1", "value": "Routing Engine 0"},
                {"index": "2", "value": {"octets": [80, 69, 77, 32, 49, 200]}},
                {"index": "3", "value": "Power Supply 0"}
            ],
            "1.3.6.1.4.1.2636.3.1.13.1.7": [
                {"index": "1", "value": 45},
                {"index": "2", "value": 2000}
            ],
            "1.3.6.1.4.1.2636.3.1.13.1.20": [{"index": "1", "value": 7}]
        }"#,
    )
    .unwrap();

    let walker = SnapshotWalker::new(WalkSnapshot::load(&path).unwrap());
    let cycle = DeviceMetricsCycle::new(&walker, PluginConfig::default(), DeviceMetadata::new("ex-2"));

    assert_eq!(cycle.entity_names().unwrap()["2"], "PEM 1");
    assert_eq!(cycle.power_modules().unwrap().len(), 2);
    assert_eq!(cycle.cpus().unwrap().len(), 1);

    let sensors = cycle.temperature_sensors().unwrap();
    assert_eq!(sensors.len(), 1);
    assert_eq!(sensors["1"].sensor_name, "Routing Engine 0");
}

#[test]
fn test_invalid_snapshot_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, r#"{"1.3.6": [{"index": 1}]}"#).unwrap();

    assert!(WalkSnapshot::load(&path).is_err());
}

#[test]
fn test_unknown_subtree_walks_empty() {
    let walker = SnapshotWalker::new(four_entity_snapshot());

    assert!(walker.walk(juniper::JNX_OPERATING_TEMP).unwrap().is_empty());
    assert_eq!(walker.walk_count(juniper::JNX_OPERATING_TEMP), 1);
    assert_eq!(walker.walk(juniper::JNX_OPERATING_DESCR).unwrap().len(), 4);
}
