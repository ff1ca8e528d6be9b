//! Typed errors for initialization, resolution and profile loading.

use std::path::PathBuf;

use hickory_resolver::error::ResolveError;
use log::SetLoggerError;
use thiserror::Error;

use crate::resolver::RecordKind;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// A record lookup that failed at the transport level.
///
/// "No such record" is not an error: the resolver adapter reports it as an
/// empty record set, matching the behavior of the original resolver facility.
/// This type covers the cases the original could not distinguish from an
/// empty answer, such as timeouts or unreachable nameservers.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The resolver reported a query failure.
    #[error("{kind} lookup for {hostname} failed: {source}")]
    Query {
        /// Fully-qualified hostname the query was sent for.
        hostname: String,
        /// Record type the query asked for.
        kind: RecordKind,
        /// Underlying resolver error.
        #[source]
        source: ResolveError,
    },

    /// The record source could not answer at all.
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

/// Errors in the expectation profile configuration.
///
/// These indicate a defect in the expectation data rather than a DNS
/// discrepancy, so they terminate the run before any check is performed.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// The requested built-in profile does not exist.
    #[error("unknown profile {0:?} (available: mail)")]
    UnknownProfile(String),

    /// The profile file could not be read.
    #[error("failed to read profile file {path}: {source}")]
    Read {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The profile file did not match the expected schema. Unknown record
    /// types and unknown TXT option names surface here.
    #[error("invalid profile file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invalid zone arguments on the command line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ZoneArgError {
    /// No zone names were left after splitting and trimming.
    #[error("no zones provided")]
    Empty,

    /// A zone name was empty or contained characters a DNS name cannot.
    #[error("invalid zone name {0:?}")]
    Invalid(String),
}
