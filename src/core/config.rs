use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{EnrichError, Result};

pub const DEFAULT_POLLING_FREQUENCY: i64 = 60;

/// Plugin configuration as handed over by the scheduling framework
///
/// ```json
/// {
///     "main": { "polling_frequency": 300 },
///     "metrics_group": { "include_disk_metrics_group": 1 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub main: MainSection,
    #[serde(default)]
    pub metrics_group: MetricsGroupSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainSection {
    /// Seconds between two poll cycles
    #[serde(
        default = "default_polling_frequency",
        deserialize_with = "lenient_integer"
    )]
    pub polling_frequency: i64,
}

impl Default for MainSection {
    fn default() -> Self {
        Self {
            polling_frequency: DEFAULT_POLLING_FREQUENCY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsGroupSection {
    #[serde(default, deserialize_with = "lenient_flag")]
    pub include_disk_metrics_group: bool,
}

fn default_polling_frequency() -> i64 {
    DEFAULT_POLLING_FREQUENCY
}

/// Configuration files written for the original plugin use strings, integers
/// and booleans interchangeably.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

fn lenient_integer<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match LenientValue::deserialize(deserializer)? {
        LenientValue::Integer(v) => Ok(v),
        LenientValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("not an integer: {:?}", text))),
        LenientValue::Bool(b) => Err(serde::de::Error::custom(format!(
            "expected an integer, found {}",
            b
        ))),
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientValue::deserialize(deserializer)? {
        LenientValue::Bool(b) => b,
        LenientValue::Integer(v) => v != 0,
        LenientValue::Text(text) => !matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "false" | "no" | "off"
        ),
    })
}

impl PluginConfig {
    pub fn new(polling_frequency: i64, include_disk_metrics_group: bool) -> Self {
        Self {
            main: MainSection { polling_frequency },
            metrics_group: MetricsGroupSection {
                include_disk_metrics_group,
            },
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;

        // An empty file means "all defaults"
        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::from_json(&data).map_err(|e| {
            EnrichError::config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn polling_frequency(&self) -> i64 {
        self.main.polling_frequency
    }

    pub fn include_disk_metrics_group(&self) -> bool {
        self.metrics_group.include_disk_metrics_group
    }

    pub fn set_polling_frequency(&mut self, seconds: i64) {
        self.main.polling_frequency = seconds;
    }

    pub fn set_include_disk_metrics_group(&mut self, enabled: bool) {
        self.metrics_group.include_disk_metrics_group = enabled;
    }
}
