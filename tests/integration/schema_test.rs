use jnx_enrich::core::enrichment::{
    unresolved_references, DeviceMetadata, DeviceMetricsCycle, EnrichmentGroup,
    EnrichmentPayload, Expression, MetricGroupSpec, MetricSpec, OidMap,
};
use jnx_enrich::core::snmp::SnapshotWalker;
use jnx_enrich::PluginConfig;

use super::common::{four_entity_snapshot, storage_walks};

fn payload(disk: bool) -> EnrichmentPayload {
    let walker = SnapshotWalker::new(storage_walks(four_entity_snapshot()));
    let cycle = DeviceMetricsCycle::new(&walker, PluginConfig::new(60, disk), DeviceMetadata::new("mx-1"));
    cycle.get_enrichment(&EnrichmentGroup::new()).unwrap()
}

#[test]
fn test_every_reference_resolves() {
    for disk in [false, true] {
        let payload = payload(disk);
        assert!(
            unresolved_references(&payload.oids, &payload.metrics_groups).is_empty(),
            "disk={}",
            disk
        );
    }
}

#[test]
fn test_payload_serde_round_trip() {
    let payload = payload(true);

    let json = serde_json::to_string(&payload).unwrap();
    let parsed: EnrichmentPayload = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, payload);
}

#[test]
fn test_payload_json_shape() {
    let value = serde_json::to_value(payload(false)).unwrap();

    assert_eq!(value["oids"]["cpu_util"]["method"], "bulk_walk");
    assert_eq!(
        value["oids"]["cpu_util"]["oid"],
        ".1.3.6.1.4.1.2636.3.1.13.1.20"
    );
    assert_eq!(value["oids"]["cpu_name"]["method"], "static");
    assert_eq!(value["oids"]["cpu_name"]["values"]["2"], "FPC 0 CPU");
    assert_eq!(value["oids"]["cpu_no"]["values"]["1"], "Module 1");
    assert_eq!(value["oids"]["power_module_types"]["values"]["PEM"], "PEM");

    let groups = value["metrics_groups"].as_array().unwrap();
    assert_eq!(groups.len(), 5);

    let temperature = &groups[0]["metrics"]["temperature_fahrenheit"];
    assert_eq!(temperature["metric_type"], "gauge");
    assert_eq!(temperature["value_type"], "float");
    assert_eq!(temperature["transform"], "celsius_to_fahrenheit");
    assert_eq!(temperature["value"]["kind"], "field");

    let memory_used = &groups[2]["metrics"]["memory_used"];
    assert_eq!(memory_used["indices_from"], "memory_total");
    assert_eq!(memory_used["value"]["kind"], "product");
    assert!(memory_used.get("transform").is_none());
}

#[test]
fn test_dangling_reference_is_rejected_by_sink() {
    let group = MetricGroupSpec::new("cpu")
        .metric("cpu_utilization", MetricSpec::gauge(Expression::field("cpu_util")));
    let sink = EnrichmentGroup::new();

    let payload = jnx_enrich::core::enrichment::emit("mx-1", OidMap::new(), vec![group], &sink);

    assert_eq!(
        unresolved_references(&payload.oids, &payload.metrics_groups),
        vec![("cpu".to_string(), "cpu_util".to_string())]
    );
    assert!(sink.is_empty());
}
