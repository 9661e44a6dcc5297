use anyhow::Result;
use clap::{Arg, Command};

use jnx_enrich::commands;

fn main() -> Result<()> {
    jnx_enrich::init_logging();

    let matches = Command::new("jnx-enrich")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inventory discovery and metrics schema assembly for Juniper devices")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue)
        )
        .subcommand(
            Command::new("enrich")
                .about("Run one enrichment cycle against a walk snapshot")
                .arg(
                    Arg::new("snapshot")
                        .help("JSON walk snapshot (oid -> [{index, value}])")
                        .required(true)
                        .index(1)
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("Plugin configuration file")
                )
                .arg(
                    Arg::new("frequency")
                        .short('f')
                        .long("frequency")
                        .value_name("SECONDS")
                        .help("Polling frequency, overrides the configuration file")
                        .value_parser(clap::value_parser!(i64))
                        .allow_negative_numbers(true)
                )
                .arg(
                    Arg::new("disk")
                        .long("disk")
                        .help("Include the disk metrics group")
                        .action(clap::ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .value_name("MODEL")
                        .help("Device model, e.g. EX4300-48T")
                )
                .arg(
                    Arg::new("device")
                        .short('d')
                        .long("device")
                        .value_name("NAME")
                        .help("Device identity used as the enrichment key")
                        .default_value("device")
                )
                .arg(
                    Arg::new("evaluate")
                        .short('e')
                        .long("evaluate")
                        .help("Also poll the walk fields and print the evaluated metrics")
                        .action(clap::ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Print the payload as single-line JSON")
                        .action(clap::ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("cpu-oid")
                .about("Show which CPU OIDs a polling frequency selects")
                .arg(
                    Arg::new("frequency")
                        .short('f')
                        .long("frequency")
                        .value_name("SECONDS")
                        .help("Polling frequency in seconds")
                        .required(true)
                        .value_parser(clap::value_parser!(i64))
                        .allow_negative_numbers(true)
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .value_name("MODEL")
                        .help("Device model")
                )
        )
        .subcommand(
            Command::new("version")
                .about("Shows version information")
        )
        .get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("enrich", sub_matches)) => commands::enrich(sub_matches)?,
        Some(("cpu-oid", sub_matches)) => commands::cpu_oid(sub_matches)?,
        Some(("version", _)) => commands::version()?,
        _ => {
            println!("Welcome to jnx-enrich!");
            println!("Use 'jnx-enrich --help' for more information.");
        }
    }

    Ok(())
}
