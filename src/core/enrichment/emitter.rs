//! Hand-off of the per-cycle schema to the enrichment sink.

use log::{debug, error};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::metrics_groups::{unresolved_references, MetricGroupSpec};
use super::oid_map::OidMap;
use crate::error::{EnrichError, Result};

/// What the poller receives for one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentPayload {
    pub oids: OidMap,
    pub metrics_groups: Vec<MetricGroupSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentSet {
    /// Device identity
    pub key: String,
    pub payload: EnrichmentPayload,
}

/// Destination for enrichment sets, keyed by device identity
pub trait EnrichmentSink: Send + Sync {
    fn add_enrichment_set(&self, set: EnrichmentSet) -> Result<()>;
}

/// In-memory sink. Rejects payloads whose groups reference fields the OID map lacks.
#[derive(Debug, Default)]
pub struct EnrichmentGroup {
    sets: Mutex<Vec<EnrichmentSet>>,
}

impl EnrichmentGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sets(&self) -> Vec<EnrichmentSet> {
        self.sets.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.sets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.lock().is_empty()
    }

    /// Latest payload recorded for `key`
    pub fn latest(&self, key: &str) -> Option<EnrichmentPayload> {
        self.sets
            .lock()
            .iter()
            .rev()
            .find(|set| set.key == key)
            .map(|set| set.payload.clone())
    }
}

impl EnrichmentSink for EnrichmentGroup {
    fn add_enrichment_set(&self, set: EnrichmentSet) -> Result<()> {
        let unresolved = unresolved_references(&set.payload.oids, &set.payload.metrics_groups);
        if let Some((group, field)) = unresolved.first() {
            return Err(EnrichError::emission(format!(
                "{}: group {} references unknown field {} ({} unresolved)",
                set.key,
                group,
                field,
                unresolved.len()
            )));
        }

        self.sets.lock().push(set);
        Ok(())
    }
}

/// Package the schema and hand it to `sink`. A rejected set is logged, never raised.
pub fn emit(
    device: &str,
    oids: OidMap,
    metrics_groups: Vec<MetricGroupSpec>,
    sink: &dyn EnrichmentSink,
) -> EnrichmentPayload {
    let payload = EnrichmentPayload {
        oids,
        metrics_groups,
    };

    debug!(
        "{}: emitting {} fields, {} groups",
        device,
        payload.oids.len(),
        payload.metrics_groups.len()
    );

    let set = EnrichmentSet {
        key: device.to_string(),
        payload: payload.clone(),
    };
    if let Err(e) = sink.add_enrichment_set(set) {
        error!("{}: failed to add enrichment set: {}", device, e);
    }

    payload
}
