//! Recorded walk results replayed as a [`SnmpWalker`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use log::debug;
use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize};

use super::{SnmpValue, SnmpWalker, Varbind};
use crate::error::{EnrichError, Result};

/// Value as written in a snapshot file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    Integer(i64),
    Text(String),
    Octets { octets: Vec<u8> },
}

impl From<SnapshotValue> for SnmpValue {
    fn from(value: SnapshotValue) -> Self {
        match value {
            SnapshotValue::Integer(v) => SnmpValue::Integer(v),
            SnapshotValue::Text(text) => SnmpValue::OctetString(text.into_bytes()),
            SnapshotValue::Octets { octets } => SnmpValue::OctetString(octets),
        }
    }
}

impl From<SnmpValue> for SnapshotValue {
    fn from(value: SnmpValue) -> Self {
        match value {
            SnmpValue::Integer(v) => SnapshotValue::Integer(v),
            SnmpValue::Counter(v) => match i64::try_from(v) {
                Ok(v) => SnapshotValue::Integer(v),
                Err(_) => SnapshotValue::Text(v.to_string()),
            },
            SnmpValue::OctetString(bytes) => match String::from_utf8(bytes) {
                Ok(text) => SnapshotValue::Text(text),
                Err(e) => SnapshotValue::Octets {
                    octets: e.into_bytes(),
                },
            },
            SnmpValue::ObjectIdentifier(oid) => SnapshotValue::Text(oid),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub index: String,
    pub value: SnapshotValue,
}

/// Walk results of one device, keyed by subtree OID
///
/// ```json
/// { ".1.3.6.1.4.1.2636.3.1.13.1.5": [{"index": "1", "value": "FPC 0 CPU"}] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WalkSnapshot {
    walks: BTreeMap<String, Vec<SnapshotEntry>>,
}

impl<'de> Deserialize<'de> for WalkSnapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let walks = BTreeMap::<String, Vec<SnapshotEntry>>::deserialize(deserializer)?
            .into_iter()
            .map(|(oid, entries)| (normalize_oid(&oid), entries))
            .collect();
        Ok(Self { walks })
    }
}

impl WalkSnapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data).map_err(|e| {
            EnrichError::config(format!("invalid walk snapshot {}: {}", path.display(), e))
        })
    }

    /// Add (or replace) the recorded result of one walk
    pub fn with_walk<S: Into<String>>(mut self, oid: S, varbinds: Vec<Varbind>) -> Self {
        let entries = varbinds
            .into_iter()
            .map(|varbind| SnapshotEntry {
                index: varbind.index,
                value: varbind.value.into(),
            })
            .collect();
        self.walks.insert(normalize_oid(&oid.into()), entries);
        self
    }

    pub fn oids(&self) -> impl Iterator<Item = &str> {
        self.walks.keys().map(String::as_str)
    }

    fn get(&self, oid: &str) -> Option<&Vec<SnapshotEntry>> {
        self.walks.get(&normalize_oid(oid))
    }
}

/// Snapshot keys are compared with a leading dot
fn normalize_oid(oid: &str) -> String {
    let trimmed = oid.trim();
    if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}

/// Replays a [`WalkSnapshot`]. Subtrees missing from the snapshot walk empty.
#[derive(Debug)]
pub struct SnapshotWalker {
    snapshot: WalkSnapshot,
    walks: Mutex<HashMap<String, usize>>,
}

impl SnapshotWalker {
    pub fn new(snapshot: WalkSnapshot) -> Self {
        Self {
            snapshot,
            walks: Mutex::new(HashMap::new()),
        }
    }

    /// Number of times `oid` has been walked
    pub fn walk_count(&self, oid: &str) -> usize {
        self.walks
            .lock()
            .get(&normalize_oid(oid))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_walks(&self) -> usize {
        self.walks.lock().values().sum()
    }
}

impl SnmpWalker for SnapshotWalker {
    fn walk(&self, oid: &str) -> Result<Vec<Varbind>> {
        *self.walks.lock().entry(normalize_oid(oid)).or_insert(0) += 1;

        let varbinds: Vec<Varbind> = self
            .snapshot
            .get(oid)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| Varbind {
                        index: entry.index.clone(),
                        value: entry.value.clone().into(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        debug!("walk {} returned {} varbinds", oid, varbinds.len());
        Ok(varbinds)
    }
}
