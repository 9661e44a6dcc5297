//! Per-cycle enrichment: OID map, metrics groups and their emission.

pub mod cycle;
pub mod emitter;
pub mod evaluator;
pub mod expression;
pub mod metrics_groups;
pub mod oid_map;

pub use cycle::{DeviceMetadata, DeviceMetricsCycle};
pub use emitter::{emit, EnrichmentGroup, EnrichmentPayload, EnrichmentSet, EnrichmentSink};
pub use evaluator::{evaluate_groups, MetricRecord, MetricValue, MetricsSnapshot, PolledValues};
pub use expression::{Expression, Transform};
pub use metrics_groups::{
    assemble_metrics_groups, unresolved_references, MetricGroupSpec, MetricSpec, MetricType,
    ValueType,
};
pub use oid_map::{build_oid_map, FieldValue, InventoryView, OidMap, OidMapEntry, OidMapOptions};
