//! zone_status library: DNS zone expectation checking
//!
//! This library queries DNS records for one or more zones and diffs them
//! against an expectation profile (MX, CNAME, SRV, TXT records), reporting
//! missing and unknown records per zone. The comparison pipeline is:
//! resolver adapter ([`resolver`]) → normalizer ([`normalize`]) → diff engine
//! ([`diff`]), driven per zone and record group by the checker ([`checker`]).
//!
//! # Example
//!
//! ```no_run
//! use zone_status::config::DEFAULT_IGNORED_KEYS;
//! use zone_status::initialization::init_resolver;
//! use zone_status::{profile, run_check, DnsRecordSource};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = DnsRecordSource::new(init_resolver());
//! let profile = profile::mail();
//! let zones = vec!["example.com".to_string()];
//!
//! let report = run_check(&zones, &profile, &source, DEFAULT_IGNORED_KEYS).await;
//! println!("passed: {:?}, failed: {:?}", report.passed, report.failed);
//! # }
//! ```

pub mod checker;
pub mod config;
pub mod diff;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod normalize;
pub mod profile;
pub mod report;
pub mod resolver;

// Re-export public API
pub use checker::{check_zone, probe_zone, run_check, ProbeResult};
pub use config::parse_zone_args;
pub use models::{CheckReport, Fields, GroupResult, RecordDiff, ZoneReport};
pub use profile::{ExpectedRecord, Group, HostSet, Profile, TxtOptions};
pub use resolver::{DnsRecordSource, RecordKind, RecordSource};
