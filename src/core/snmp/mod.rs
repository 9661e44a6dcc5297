//! SNMP walk abstraction.
//!
//! The engine never speaks SNMP itself. Everything it needs from a device
//! comes through [`SnmpWalker`], which returns every varbind under a subtree.

pub mod mibs;
mod snapshot;

pub use snapshot::{SnapshotValue, SnapshotWalker, WalkSnapshot};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Value carried by a single varbind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnmpValue {
    Integer(i64),
    Counter(u64),
    OctetString(Vec<u8>),
    ObjectIdentifier(String),
}

impl SnmpValue {
    /// Numeric view of the value. Octet strings holding a decimal number are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SnmpValue::Integer(v) => Some(*v),
            SnmpValue::Counter(v) => i64::try_from(*v).ok(),
            SnmpValue::OctetString(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
            SnmpValue::ObjectIdentifier(_) => None,
        }
    }

    /// Text view that silently drops every non-ASCII byte.
    pub fn to_ascii_lossy(&self) -> String {
        match self {
            SnmpValue::OctetString(bytes) => bytes
                .iter()
                .filter(|b| b.is_ascii())
                .map(|&b| b as char)
                .collect(),
            other => other.to_string(),
        }
    }

    /// Text view that replaces invalid UTF-8 sequences.
    pub fn to_text(&self) -> String {
        match self {
            SnmpValue::OctetString(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for SnmpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnmpValue::Integer(v) => write!(f, "{}", v),
            SnmpValue::Counter(v) => write!(f, "{}", v),
            SnmpValue::OctetString(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
            SnmpValue::ObjectIdentifier(oid) => write!(f, "{}", oid),
        }
    }
}

impl From<i64> for SnmpValue {
    fn from(value: i64) -> Self {
        SnmpValue::Integer(value)
    }
}

impl From<i32> for SnmpValue {
    fn from(value: i32) -> Self {
        SnmpValue::Integer(value.into())
    }
}

impl From<&str> for SnmpValue {
    fn from(value: &str) -> Self {
        SnmpValue::OctetString(value.as_bytes().to_vec())
    }
}

/// One (index, value) pair returned by a walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Varbind {
    pub index: String,
    pub value: SnmpValue,
}

impl Varbind {
    pub fn new<I: Into<String>, V: Into<SnmpValue>>(index: I, value: V) -> Self {
        Self {
            index: index.into(),
            value: value.into(),
        }
    }
}

/// Trait for SNMP walk providers
///
/// Implementations own the transport: sessions, retries, timeouts and PDU
/// encoding all live behind this call. An empty result is a valid answer.
pub trait SnmpWalker: Send + Sync {
    /// Return every varbind under `oid`, indexed relative to it
    fn walk(&self, oid: &str) -> Result<Vec<Varbind>>;
}

/// Walk `oid` and key the result by index. Later duplicates win.
pub fn walk_map(walker: &dyn SnmpWalker, oid: &str) -> Result<BTreeMap<String, SnmpValue>> {
    Ok(walker
        .walk(oid)?
        .into_iter()
        .map(|varbind| (varbind.index, varbind.value))
        .collect())
}
