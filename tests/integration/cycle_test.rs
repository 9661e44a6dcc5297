use jnx_enrich::core::enrichment::{
    unresolved_references, DeviceMetadata, DeviceMetricsCycle, EnrichmentGroup, FieldValue,
    MetricType,
};
use jnx_enrich::core::inventory::PowerModuleType;
use jnx_enrich::core::snmp::mibs::{host_resources, juniper};
use jnx_enrich::core::snmp::{SnapshotWalker, WalkSnapshot};
use jnx_enrich::PluginConfig;

use super::common::{four_entity_snapshot, storage_walks};

fn group_names(cycle: &DeviceMetricsCycle<'_>) -> Vec<String> {
    cycle
        .metrics_groups()
        .unwrap()
        .iter()
        .map(|group| group.group_name.clone())
        .collect()
}

#[test]
fn test_four_entity_device() {
    let walker = SnapshotWalker::new(four_entity_snapshot());
    let cycle = DeviceMetricsCycle::new(
        &walker,
        PluginConfig::new(60, false),
        DeviceMetadata::new("mx480-1").with_model("MX480"),
    );

    assert_eq!(cycle.entity_names().unwrap().len(), 4);
    assert_eq!(cycle.cpus().unwrap().len(), 2);
    assert_eq!(cycle.fans().unwrap().len(), 1);
    assert_eq!(cycle.temperature_sensors().unwrap().len(), 0);

    let power = cycle.power_modules().unwrap();
    assert_eq!(power.len(), 1);
    assert_eq!(power["4"].module_type, PowerModuleType::PEM);

    assert_eq!(
        group_names(&cycle),
        vec!["environment", "cpu", "memory", "environment", "environment"]
    );

    let oid_map = cycle.oid_map().unwrap();
    assert_eq!(oid_map.walk_oid("cpu_util"), Some(juniper::JNX_OPERATING_1MIN_AVG_CPU));
    assert!(!oid_map.contains("storage_description"));
    assert!(unresolved_references(oid_map, cycle.metrics_groups().unwrap()).is_empty());

    let memory_total = oid_map.static_values("memory_total").unwrap();
    assert_eq!(memory_total.len(), 2);
    assert_eq!(memory_total["1"], FieldValue::Integer(2048 * 1_048_576));
    assert_eq!(cycle.memory().unwrap().len(), 4);

    assert_eq!(
        oid_map.static_values("power_units_total").unwrap()["PEM"],
        FieldValue::Integer(1)
    );
}

#[test]
fn test_four_entity_device_evaluation() {
    let walker = SnapshotWalker::new(four_entity_snapshot());
    let cycle = DeviceMetricsCycle::new(&walker, PluginConfig::default(), DeviceMetadata::new("mx480-1"));

    let records = cycle.poll().unwrap().records;

    let cpu: Vec<_> = records.iter().filter(|r| r.group_name == "cpu").collect();
    assert_eq!(cpu.len(), 2);
    assert_eq!(cpu[0].dimensions["cpu_type"], "data");
    assert_eq!(cpu[0].dimensions["cpu_no"], "Module 1");
    assert_eq!(cpu[1].dimensions["cpu_type"], "ctrl");
    assert_eq!(cpu[1].metrics["cpu_utilization"].value, 4.0);

    let memory: Vec<_> = records.iter().filter(|r| r.group_name == "memory").collect();
    assert_eq!(memory.len(), 2);
    assert_eq!(memory[0].metrics["memory_used"].value, 1_073_741_824.0);
    assert_eq!(memory[1].dimensions["memory_type"], "FPC 0 CPU");

    let fans = records
        .iter()
        .find(|r| r.metrics.contains_key("fans_total"))
        .unwrap();
    assert_eq!(fans.index, None);
    assert_eq!(fans.metrics["fans_ok"].value, 1.0);
    assert_eq!(fans.metrics["fans_total"].value, 1.0);

    let power = records
        .iter()
        .find(|r| r.metrics.contains_key("power_units_on"))
        .unwrap();
    assert_eq!(power.index.as_deref(), Some("PEM"));
    assert_eq!(power.dimensions["power_module_type"], "PEM");
    assert_eq!(power.metrics["power_units_on"].value, 1.0);

    assert!(!records.iter().any(|r| r.metrics.contains_key("temperature_fahrenheit")));
}

#[test]
fn test_disk_group_needs_flag_and_storage() {
    let with_storage = storage_walks(four_entity_snapshot());

    let walker = SnapshotWalker::new(with_storage.clone());
    let cycle = DeviceMetricsCycle::new(&walker, PluginConfig::new(60, true), DeviceMetadata::new("a"));
    assert_eq!(group_names(&cycle).last().map(String::as_str), Some("disk"));
    assert_eq!(group_names(&cycle).len(), 6);

    let walker = SnapshotWalker::new(with_storage);
    let cycle = DeviceMetricsCycle::new(&walker, PluginConfig::new(60, false), DeviceMetadata::new("b"));
    assert!(!group_names(&cycle).contains(&"disk".to_string()));
    assert_eq!(walker.walk_count(host_resources::HR_STORAGE_DESCR), 0);

    let walker = SnapshotWalker::new(four_entity_snapshot());
    let cycle = DeviceMetricsCycle::new(&walker, PluginConfig::new(60, true), DeviceMetadata::new("c"));
    assert!(!group_names(&cycle).contains(&"disk".to_string()));
    assert!(cycle.oid_map().unwrap().contains("storage_description"));
}

#[test]
fn test_storage_index_without_allocation_unit() {
    let walker = SnapshotWalker::new(storage_walks(four_entity_snapshot()));
    let cycle = DeviceMetricsCycle::new(&walker, PluginConfig::new(60, true), DeviceMetadata::new("srx-1"));

    let oid_map = cycle.oid_map().unwrap();
    let totals = oid_map.static_values("storage_total_bytes").unwrap();
    assert_eq!(totals.get("1"), Some(&FieldValue::Integer(4_096_000)));
    assert!(!totals.contains_key("7"));
    assert!(oid_map.static_values("storage_description").unwrap().contains_key("7"));
    assert_eq!(
        oid_map.static_values("storage_type").unwrap()["7"],
        FieldValue::from("hrStorageRamDisk")
    );

    let records = cycle.poll().unwrap().records;
    let disk: Vec<_> = records.iter().filter(|r| r.group_name == "disk").collect();
    assert_eq!(disk.len(), 2);

    assert_eq!(disk[0].metrics["storage_used_bytes"].value, 1_024_000.0);
    assert_eq!(disk[0].metrics["storage_total_bytes"].value, 4_096_000.0);

    assert_eq!(disk[1].index.as_deref(), Some("7"));
    assert_eq!(disk[1].dimensions["storage_description"], "/dev/md0: tmp");
    let failures = &disk[1].metrics["storage_allocation_failures"];
    assert_eq!(failures.metric_type, MetricType::Counter);
    assert_eq!(failures.value, 3.0);
    assert!(!disk[1].metrics.contains_key("storage_total_bytes"));
    assert!(!disk[1].metrics.contains_key("storage_used_bytes"));
}

#[test]
fn test_ex4300_uses_instant_cpu_for_utilization() {
    let walker = SnapshotWalker::new(four_entity_snapshot());
    let cycle = DeviceMetricsCycle::new(
        &walker,
        PluginConfig::new(60, false),
        DeviceMetadata::new("ex-1").with_model("EX4300-48P"),
    );

    let sink = EnrichmentGroup::new();
    let payload = cycle.get_enrichment(&sink).unwrap();

    assert_eq!(payload.oids.walk_oid("cpu_util"), Some(juniper::JNX_OPERATING_CPU));
    assert_eq!(cycle.cpus().unwrap().len(), 2);
    assert_eq!(sink.latest("ex-1"), Some(payload));
}

#[test]
fn test_empty_device_is_well_formed() {
    let walker = SnapshotWalker::new(WalkSnapshot::default());
    let cycle = DeviceMetricsCycle::new(&walker, PluginConfig::new(900, true), DeviceMetadata::new("empty"));

    assert_eq!(group_names(&cycle), vec!["environment", "cpu", "memory"]);
    assert_eq!(
        walker.walk_count(juniper::JNX_OPERATING_15MIN_AVG_CPU),
        1
    );

    let sink = EnrichmentGroup::new();
    let payload = cycle.get_enrichment(&sink).unwrap();
    assert_eq!(sink.len(), 1);
    assert!(payload.oids.static_values("cpu_name").unwrap().is_empty());
    assert!(cycle.poll().unwrap().records.is_empty());
}
