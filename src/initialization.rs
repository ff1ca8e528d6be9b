//! Logger and DNS resolver initialization.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use log::LevelFilter;

use crate::config::{LogFormat, DNS_TIMEOUT_SECS};
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. The logger reads from the
/// `RUST_LOG` environment variable by default, but the provided `level`
/// parameter overrides it, so `--log-level` always wins.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger was already set.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // Suppress hickory warnings about malformed upstream answers; they are
    // handled inside the resolver and only add noise at default levels.
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("zone_status", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };
                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so tests that initialize repeatedly get an error, not a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Initializes the DNS resolver for record lookups.
///
/// Uses the default resolver configuration with a bounded query timeout and
/// reduced retry attempts so an unresponsive nameserver fails the lookup
/// instead of stalling the whole run. `ndots = 0` prevents search-domain
/// appending, which would silently query the wrong names.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    opts.ndots = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
