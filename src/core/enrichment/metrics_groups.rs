//! Metrics group declarations.
//!
//! Groups are declared, not evaluated: each dimension and metric is an
//! [`Expression`] over OID map fields. Which groups exist depends only on
//! how many components of each kind were classified and on configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::expression::{Expression, Transform};
use super::oid_map::{InventoryView, OidMap, POWER_MODULE_TYPES};
use crate::core::snmp::mibs::juniper::OPER_STATE_DOWN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Gauge,
    Counter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Integer,
    Float,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub metric_type: MetricType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    pub value: Expression,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    /// Field whose indices this metric iterates, instead of the value's own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices_from: Option<String>,
}

impl MetricSpec {
    pub fn gauge(value: Expression) -> Self {
        Self {
            metric_type: MetricType::Gauge,
            value_type: None,
            value,
            transform: None,
            indices_from: None,
        }
    }

    pub fn counter(value: Expression) -> Self {
        Self {
            metric_type: MetricType::Counter,
            ..Self::gauge(value)
        }
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_indices_from<S: Into<String>>(mut self, field: S) -> Self {
        self.indices_from = Some(field.into());
        self
    }

    /// Field providing the indices to evaluate, if the metric is per-index
    pub fn index_source(&self) -> Option<&str> {
        self.indices_from
            .as_deref()
            .or_else(|| self.value.index_source())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricGroupSpec {
    pub group_name: String,
    pub dimensions: BTreeMap<String, Expression>,
    pub metrics: BTreeMap<String, MetricSpec>,
}

impl MetricGroupSpec {
    pub fn new<S: Into<String>>(group_name: S) -> Self {
        Self {
            group_name: group_name.into(),
            dimensions: BTreeMap::new(),
            metrics: BTreeMap::new(),
        }
    }

    pub fn dimension<S: Into<String>>(mut self, name: S, expression: Expression) -> Self {
        self.dimensions.insert(name.into(), expression);
        self
    }

    pub fn metric<S: Into<String>>(mut self, name: S, spec: MetricSpec) -> Self {
        self.metrics.insert(name.into(), spec);
        self
    }

    /// Every OID map field read by a dimension or metric of this group
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self
            .dimensions
            .values()
            .flat_map(Expression::referenced_fields)
            .collect();

        for spec in self.metrics.values() {
            fields.extend(spec.value.referenced_fields());
            fields.extend(spec.indices_from.as_deref());
        }

        fields.sort_unstable();
        fields.dedup();
        fields
    }
}

/// `(group_name, field)` pairs referenced by a group but absent from the map
pub fn unresolved_references(oid_map: &OidMap, groups: &[MetricGroupSpec]) -> Vec<(String, String)> {
    groups
        .iter()
        .flat_map(|group| {
            group
                .referenced_fields()
                .into_iter()
                .filter(|field| !oid_map.contains(field))
                .map(|field| (group.group_name.clone(), field.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn down_statuses() -> Vec<String> {
    vec![OPER_STATE_DOWN.to_string()]
}

/// Declare the metrics groups for one cycle.
///
/// The temperature, cpu and memory groups are always present. Power and fan
/// groups need at least one classified module; the disk group needs storage
/// volumes and the disk flag.
pub fn assemble_metrics_groups(
    inventory: &InventoryView<'_>,
    include_disk_metrics_group: bool,
) -> Vec<MetricGroupSpec> {
    let mut groups = vec![
        MetricGroupSpec::new("environment")
            .dimension("sensor", Expression::field("temp_sensor_name"))
            .metric(
                "temperature_fahrenheit",
                MetricSpec::gauge(Expression::field("temp_sensor_values"))
                    .with_value_type(ValueType::Float)
                    .with_transform(Transform::CelsiusToFahrenheit),
            ),
        MetricGroupSpec::new("cpu")
            .dimension("cpu_name", Expression::field("cpu_name"))
            .dimension("cpu_no", Expression::field("cpu_no"))
            .dimension(
                "cpu_type",
                Expression::IfContains {
                    field: "cpu_name".to_string(),
                    needle: "Routing Engine".to_string(),
                    then: "data".to_string(),
                    otherwise: "ctrl".to_string(),
                },
            )
            .metric(
                "cpu_utilization",
                MetricSpec::gauge(Expression::field("cpu_util")),
            ),
        MetricGroupSpec::new("memory")
            .dimension("memory_type", Expression::field("cpu_name"))
            .metric(
                "memory_used",
                MetricSpec::gauge(Expression::Product {
                    factors: vec![
                        Expression::field("memory_used"),
                        Expression::field("memory_total"),
                    ],
                    divisor: 100.0,
                })
                .with_indices_from("memory_total"),
            )
            .metric(
                "memory_total",
                MetricSpec::gauge(Expression::field("memory_total")),
            ),
    ];

    if !inventory.power_modules.is_empty() {
        groups.push(
            MetricGroupSpec::new("environment")
                .dimension("power_module_type", Expression::field(POWER_MODULE_TYPES))
                .metric(
                    "power_units_on",
                    MetricSpec::gauge(Expression::CountMatching {
                        status_field: "oper_status".to_string(),
                        members: POWER_MODULE_TYPES.to_string(),
                        excluded_statuses: down_statuses(),
                        match_index: true,
                    })
                    .with_indices_from("power_units_total"),
                )
                .metric(
                    "power_units_total",
                    MetricSpec::gauge(Expression::field("power_units_total")),
                ),
        );
    }

    if !inventory.fans.is_empty() {
        groups.push(
            MetricGroupSpec::new("environment")
                .metric(
                    "fans_ok",
                    MetricSpec::gauge(Expression::CountMatching {
                        status_field: "oper_status".to_string(),
                        members: "fans".to_string(),
                        excluded_statuses: down_statuses(),
                        match_index: false,
                    }),
                )
                .metric(
                    "fans_total",
                    MetricSpec::gauge(Expression::literal(inventory.fans.len() as i64)),
                ),
        );
    }

    if include_disk_metrics_group && !inventory.storage.is_empty() {
        groups.push(
            MetricGroupSpec::new("disk")
                .dimension("storage_description", Expression::field("storage_description"))
                .dimension("storage_type", Expression::field("storage_type"))
                .metric(
                    "storage_allocation_failures",
                    MetricSpec::counter(Expression::field("storage_allocation_failures")),
                )
                .metric(
                    "storage_used_bytes",
                    MetricSpec::gauge(Expression::Product {
                        factors: vec![
                            Expression::field("storage_used_bytes"),
                            Expression::field("storage_allocation_units"),
                        ],
                        divisor: 1.0,
                    }),
                )
                .metric(
                    "storage_total_bytes",
                    MetricSpec::gauge(Expression::field("storage_total_bytes")),
                ),
        );
    }

    groups
}
