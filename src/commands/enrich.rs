use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;

use crate::core::config::PluginConfig;
use crate::core::enrichment::{DeviceMetadata, DeviceMetricsCycle, EnrichmentGroup};
use crate::core::snmp::{SnapshotWalker, WalkSnapshot};
use crate::ui;

/// Plugin configuration from `--config`, with command line overrides applied
fn resolve_config(matches: &clap::ArgMatches) -> Result<PluginConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => PluginConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load plugin config from {}", path))?,
        None => PluginConfig::default(),
    };

    if let Some(seconds) = matches.get_one::<i64>("frequency") {
        config.set_polling_frequency(*seconds);
    }
    if matches.get_flag("disk") {
        config.set_include_disk_metrics_group(true);
    }

    Ok(config)
}

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let snapshot_path = matches
        .get_one::<String>("snapshot")
        .context("Snapshot argument is required")?;
    let device_name = matches
        .get_one::<String>("device")
        .context("Device argument is required")?;

    let config = resolve_config(matches)?;
    let snapshot = WalkSnapshot::load(Path::new(snapshot_path))
        .with_context(|| format!("Failed to load walk snapshot from {}", snapshot_path))?;
    let walker = SnapshotWalker::new(snapshot);

    let mut device = DeviceMetadata::new(device_name.as_str());
    if let Some(model) = matches.get_one::<String>("model") {
        device = device.with_model(model.as_str());
    }

    let sink = EnrichmentGroup::new();
    let cycle = DeviceMetricsCycle::new(&walker, config, device);
    let payload = cycle
        .get_enrichment(&sink)
        .with_context(|| format!("Enrichment cycle failed for {}", device_name))?;

    if sink.is_empty() {
        eprintln!(
            "{}",
            "Warning: enrichment set was rejected, see log for details".yellow()
        );
    }

    let json = if matches.get_flag("compact") {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };
    println!("{}", json);

    if matches.get_flag("evaluate") {
        let snapshot = cycle
            .poll()
            .with_context(|| format!("Failed to poll metrics for {}", device_name))?;
        ui::print_metrics_snapshot(&snapshot);
    }

    debug!("{}: {} walks", device_name, walker.total_walks());
    Ok(())
}
