use std::fmt::Display;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::enrichment::cycle::UNKNOWN_MODEL;
use crate::core::inventory::{cpu_util_oid, select_cpu_oid};

fn print_row(label: &str, value: impl Display) {
    println!("{} {}", format!("{:<10}", label).bold(), value);
}

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let seconds = *matches
        .get_one::<i64>("frequency")
        .context("Frequency argument is required")?;
    let model = matches
        .get_one::<String>("model")
        .map(String::as_str)
        .unwrap_or(UNKNOWN_MODEL);

    print_row("polling", format!("{}s", seconds));
    print_row("model", model);
    print_row("cpu walk", select_cpu_oid(seconds).bright_cyan());
    print_row("cpu_util", cpu_util_oid(seconds, model).bright_cyan());

    Ok(())
}
