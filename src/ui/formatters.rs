use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use colored::*;

use crate::core::enrichment::{MetricRecord, MetricType, MetricsSnapshot};

/// Integral values print without decimals, everything else with two
pub fn format_metric_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// `key=value` pairs in key order
pub fn format_dimensions(dimensions: &BTreeMap<String, String>) -> String {
    dimensions
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a Unix timestamp as local time (YYYY-MM-DD HH:MM:SS)
pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => timestamp.to_string(),
    }
}

fn metric_rows(record: &MetricRecord) -> Vec<(String, String, ColoredString)> {
    record
        .metrics
        .iter()
        .map(|(name, metric)| {
            let value = format_metric_value(metric.value);
            let value = match metric.metric_type {
                MetricType::Gauge => value.bright_green(),
                MetricType::Counter => value.yellow(),
            };
            (name.clone(), format_dimensions(&record.dimensions), value)
        })
        .collect()
}

/// Print evaluated records as a table, one row per metric
pub fn print_metrics_snapshot(snapshot: &MetricsSnapshot) {
    println!(
        "\n{} {}",
        "METRICS".bold().bright_cyan(),
        format_timestamp(snapshot.timestamp).dimmed()
    );
    println!("{}", "=".repeat(80));

    if snapshot.records.is_empty() {
        println!("{}", "No metric records".dimmed());
        return;
    }

    println!(
        "{:<12} {:<8} {:<26} {:<40} {}",
        "GROUP".bold(),
        "INDEX".bold(),
        "METRIC".bold(),
        "DIMENSIONS".bold(),
        "VALUE".bold()
    );

    for record in &snapshot.records {
        let index = record.index.as_deref().unwrap_or("-");
        for (name, dimensions, value) in metric_rows(record) {
            println!(
                "{} {:<8} {:<26} {:<40} {}",
                format!("{:<12}", record.group_name).bright_cyan(),
                index,
                name,
                dimensions,
                value
            );
        }
    }

    println!("\n{} records", snapshot.records.len().to_string().bold());
}
