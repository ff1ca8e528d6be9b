//! Command-line options, logging enums and check configuration constants.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error_handling::ZoneArgError;

/// DNS query timeout in seconds.
pub const DNS_TIMEOUT_SECS: u64 = 10;

/// Record fields that are resolver bookkeeping rather than configuration:
/// stripped from both record sets before comparison. Passed explicitly into
/// every check call.
pub const DEFAULT_IGNORED_KEYS: &[&str] = &["class", "ttl", "entries"];

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Command-line interface.
///
/// # Examples
///
/// ```bash
/// # Check one or more zones against the built-in mail profile
/// zone_status check example.com example.org
/// zone_status check example.com,example.org
///
/// # Check against a profile file
/// zone_status check example.com --profile-file ./mail.json
///
/// # Dump raw resolver answers for a zone
/// zone_status probe example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "zone_status",
    about = "Checks the DNS records of one or more zones against an expectation profile.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check zones against an expectation profile
    Check(CheckArgs),
    /// Dump the raw resolver answers for a zone's well-known mail hostnames
    Probe(ProbeArgs),
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Zones to check; repeat the argument or separate names with commas
    #[arg(required = true)]
    pub zones: Vec<String>,

    /// Built-in expectation profile to check against
    #[arg(long, default_value = "mail")]
    pub profile: String,

    /// JSON profile file to check against (overrides --profile)
    #[arg(long)]
    pub profile_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Zone to probe
    pub zone: String,
}

/// Splits, trims and validates the zone arguments.
///
/// Each argument may carry several names separated by commas. Names are
/// lowercased. An empty segment or a name with characters a DNS name cannot
/// contain is a configuration error, reported before any check runs.
pub fn parse_zone_args(args: &[String]) -> Result<Vec<String>, ZoneArgError> {
    let mut zones = Vec::new();
    for arg in args {
        for segment in arg.split(',') {
            let zone = segment.trim().to_ascii_lowercase();
            if !is_valid_zone(&zone) {
                return Err(ZoneArgError::Invalid(segment.trim().to_string()));
            }
            zones.push(zone);
        }
    }
    if zones.is_empty() {
        return Err(ZoneArgError::Empty);
    }
    Ok(zones)
}

fn is_valid_zone(zone: &str) -> bool {
    !zone.is_empty()
        && !zone.starts_with('.')
        && !zone.ends_with('.')
        && zone
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_'))
}
