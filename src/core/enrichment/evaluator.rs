//! Interpreter for metrics group declarations.
//!
//! [`PolledValues`] resolves every OID map field to an index -> value table
//! (static tables as-is, walk fields through a fresh walk). Groups are then
//! evaluated per index into [`MetricRecord`]s.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::debug;
use serde::{Deserialize, Serialize};

use super::expression::Expression;
use super::metrics_groups::{MetricGroupSpec, MetricSpec, MetricType};
use super::oid_map::{FieldValue, OidMap, OidMapEntry};
use crate::core::snmp::{walk_map, SnmpWalker};
use crate::error::Result;

/// Field values of one poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolledValues {
    fields: BTreeMap<String, BTreeMap<String, FieldValue>>,
}

impl PolledValues {
    /// Resolve every field of `oid_map`; a subtree shared by several fields is walked once.
    pub fn collect(oid_map: &OidMap, walker: &dyn SnmpWalker) -> Result<Self> {
        let mut walked: HashMap<&str, BTreeMap<String, FieldValue>> = HashMap::new();
        let mut fields = BTreeMap::new();

        for (name, entry) in oid_map.iter() {
            let values = match entry {
                OidMapEntry::Static { values } => values.clone(),
                OidMapEntry::BulkWalk { oid } => {
                    if !walked.contains_key(oid.as_str()) {
                        let values = walk_map(walker, oid)?
                            .into_iter()
                            .map(|(index, value)| (index, FieldValue::from(value)))
                            .collect();
                        walked.insert(oid.as_str(), values);
                    }
                    walked.get(oid.as_str()).cloned().unwrap_or_default()
                }
            };
            fields.insert(name.to_string(), values);
        }

        Ok(Self { fields })
    }

    pub fn insert<S: Into<String>>(&mut self, field: S, values: BTreeMap<String, FieldValue>) {
        self.fields.insert(field.into(), values);
    }

    pub fn table(&self, field: &str) -> Option<&BTreeMap<String, FieldValue>> {
        self.fields.get(field)
    }

    pub fn get(&self, field: &str, index: &str) -> Option<&FieldValue> {
        self.fields.get(field)?.get(index)
    }

    pub fn indices(&self, field: &str) -> impl Iterator<Item = &str> {
        self.fields
            .get(field)
            .into_iter()
            .flat_map(|values| values.keys().map(String::as_str))
    }
}

impl Expression {
    /// Evaluate at `index`; `None` when a referenced value is missing or not numeric.
    pub fn evaluate(&self, polled: &PolledValues, index: Option<&str>) -> Option<FieldValue> {
        match self {
            Expression::Field { field } => polled.get(field, index?).cloned(),
            Expression::Literal { value } => Some(value.clone()),
            Expression::Product { factors, divisor } => {
                let mut factors = factors.iter();
                let mut product = factors.next()?.evaluate(polled, index)?.as_f64()? / divisor;
                for factor in factors {
                    product *= factor.evaluate(polled, index)?.as_f64()?;
                }
                Some(FieldValue::Float(product))
            }
            Expression::IfContains {
                field,
                needle,
                then,
                otherwise,
            } => {
                let value = polled.get(field, index?)?;
                let chosen = if value.to_string().contains(needle.as_str()) {
                    then
                } else {
                    otherwise
                };
                Some(FieldValue::Text(chosen.clone()))
            }
            Expression::CountMatching {
                status_field,
                members,
                excluded_statuses,
                match_index,
            } => {
                let statuses = polled.table(status_field)?;
                let members = polled.table(members)?;
                let wanted = if *match_index { Some(index?) } else { None };

                let count = statuses
                    .iter()
                    .filter(|(x, y)| {
                        let Some(member) = members.get(x.as_str()) else {
                            return false;
                        };
                        !excluded_statuses.contains(&y.to_string())
                            && wanted.map_or(true, |wanted| member.to_string() == wanted)
                    })
                    .count();

                Some(FieldValue::Integer(count as i64))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub metric_type: MetricType,
    pub value: f64,
}

/// One evaluated row of a metrics group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub group_name: String,
    /// `None` for aggregate groups
    pub index: Option<String>,
    pub dimensions: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, MetricValue>,
}

/// Records of one poll, stamped with the collection time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: i64, // Unix timestamp
    pub records: Vec<MetricRecord>,
}

impl MetricsSnapshot {
    pub fn new(records: Vec<MetricRecord>) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp(),
            records,
        }
    }
}

fn evaluate_metric(spec: &MetricSpec, polled: &PolledValues, index: Option<&str>) -> Option<MetricValue> {
    let raw = spec.value.evaluate(polled, index)?.as_f64()?;
    let value = match spec.transform {
        Some(transform) => transform.apply(raw),
        None => raw,
    };

    Some(MetricValue {
        metric_type: spec.metric_type,
        value,
    })
}

fn build_record(
    group: &MetricGroupSpec,
    polled: &PolledValues,
    index: Option<&str>,
    metrics: BTreeMap<String, MetricValue>,
) -> Option<MetricRecord> {
    if metrics.is_empty() {
        return None;
    }

    let mut dimensions = BTreeMap::new();
    for (name, expression) in &group.dimensions {
        match expression.evaluate(polled, index) {
            Some(value) => {
                dimensions.insert(name.clone(), value.to_string());
            }
            None => {
                debug!(
                    "{}: dimension {} unresolved at index {:?}, skipping",
                    group.group_name, name, index
                );
                return None;
            }
        }
    }

    Some(MetricRecord {
        group_name: group.group_name.clone(),
        index: index.map(str::to_string),
        dimensions,
        metrics,
    })
}

/// Evaluate one group.
///
/// Per-index metrics run over the indices of their source field; a record is
/// dropped when one of its dimensions cannot be resolved at that index. A
/// group made only of aggregate metrics yields a single record.
pub fn evaluate_group(group: &MetricGroupSpec, polled: &PolledValues) -> Vec<MetricRecord> {
    let indexed: Vec<(&String, &MetricSpec, &str)> = group
        .metrics
        .iter()
        .filter_map(|(name, spec)| spec.index_source().map(|source| (name, spec, source)))
        .collect();

    if indexed.is_empty() {
        let metrics = group
            .metrics
            .iter()
            .filter_map(|(name, spec)| Some((name.clone(), evaluate_metric(spec, polled, None)?)))
            .collect();
        return build_record(group, polled, None, metrics).into_iter().collect();
    }

    let indices: BTreeSet<&str> = indexed
        .iter()
        .flat_map(|(_, _, source)| polled.indices(source))
        .collect();

    let mut records = Vec::new();
    for index in indices {
        let metrics: BTreeMap<String, MetricValue> = indexed
            .iter()
            .filter(|(_, _, source)| polled.get(source, index).is_some())
            .filter_map(|(name, spec, _)| {
                Some(((*name).clone(), evaluate_metric(spec, polled, Some(index))?))
            })
            .collect();

        if let Some(record) = build_record(group, polled, Some(index), metrics) {
            records.push(record);
        }
    }

    records
}

pub fn evaluate_groups(groups: &[MetricGroupSpec], polled: &PolledValues) -> Vec<MetricRecord> {
    groups
        .iter()
        .flat_map(|group| evaluate_group(group, polled))
        .collect()
}
