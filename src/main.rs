//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `zone_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit status mapping
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::Result;
use clap::Parser;

use zone_status::config::{CheckArgs, Cli, Command, ProbeArgs, DEFAULT_IGNORED_KEYS};
use zone_status::initialization::{init_logger_with, init_resolver};
use zone_status::{
    parse_zone_args, probe_zone, profile, report, run_check, CheckReport, DnsRecordSource,
};

// Exit status: 0 all zones passed, 1 at least one zone failed,
// 2 input or configuration error (no checks performed).
const EXIT_ZONE_FAILURES: i32 = 1;
const EXIT_CONFIG_ERROR: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logger_with(cli.log_level.clone().into(), cli.log_format.clone()) {
        eprintln!("zone_status error: {e:#}");
        process::exit(EXIT_CONFIG_ERROR);
    }

    let code = match cli.command {
        Command::Check(args) => run_check_command(args).await,
        Command::Probe(args) => run_probe_command(args).await,
    };

    match code {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("zone_status error: {e:#}");
            process::exit(EXIT_CONFIG_ERROR);
        }
    }
}

async fn run_check_command(args: CheckArgs) -> Result<i32> {
    let zones = parse_zone_args(&args.zones)?;
    let profile = match &args.profile_file {
        Some(path) => profile::load_file(path)?,
        None => profile::by_name(&args.profile)?,
    };

    let source = DnsRecordSource::new(init_resolver());
    let report = run_check(&zones, &profile, &source, DEFAULT_IGNORED_KEYS).await;
    report::print_report(&report);

    Ok(evaluate_exit_code(&report))
}

async fn run_probe_command(args: ProbeArgs) -> Result<i32> {
    let zones = parse_zone_args(std::slice::from_ref(&args.zone))?;

    let source = DnsRecordSource::new(init_resolver());
    for zone in &zones {
        let results = probe_zone(zone, &source).await;
        report::print_probe(&results);
    }

    Ok(0)
}

fn evaluate_exit_code(report: &CheckReport) -> i32 {
    if report.failed.is_empty() {
        0
    } else {
        EXIT_ZONE_FAILURES
    }
}
