use std::collections::BTreeMap;

use log::debug;

use super::types::{EntityCatalog, TemperatureSensor};
use crate::core::snmp::Varbind;

/// Upper sanity bound for a reading, in Celsius. Anything at or above it,
/// like anything at or below zero, is an error or placeholder value.
pub const MELTING_POINT_OF_STEEL: i64 = 1370;

/// Whether a raw jnxOperatingTemp reading is a real measurement
pub fn is_plausible_reading(celsius: i64) -> bool {
    0 < celsius && celsius < MELTING_POINT_OF_STEEL
}

/// Keep sensors with plausible readings and attach their catalog name.
pub fn classify_temperatures(
    catalog: &EntityCatalog,
    readings: &[Varbind],
) -> BTreeMap<String, TemperatureSensor> {
    let mut sensors = BTreeMap::new();

    for varbind in readings {
        let Some(raw_value) = varbind.value.as_i64() else {
            debug!("temperature {} is not numeric: {}", varbind.index, varbind.value);
            continue;
        };

        if !is_plausible_reading(raw_value) {
            continue;
        }

        let Some(name) = catalog.get(&varbind.index) else {
            debug!("temperature sensor {} has no entity description", varbind.index);
            continue;
        };

        sensors.insert(
            varbind.index.clone(),
            TemperatureSensor {
                index: varbind.index.clone(),
                sensor_name: name.clone(),
                raw_value,
            },
        );
    }

    sensors
}
