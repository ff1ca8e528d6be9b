//! The zone checker: drives resolver, normalizer and diff engine for each
//! record group of each requested zone.

use std::slice;

use log::{debug, warn};

use crate::diff::diff;
use crate::models::{CheckReport, Fields, GroupResult, RecordDiff, ZoneReport};
use crate::normalize::{apply_txt_options, normalize};
use crate::profile::{ExpectedRecord, Group, HostSet, Profile};
use crate::resolver::{RecordKind, RecordSource};

/// Checks every requested zone against the profile and accumulates the
/// sorted passed/failed zone lists.
pub async fn run_check(
    zones: &[String],
    profile: &Profile,
    source: &dyn RecordSource,
    ignore_keys: &[&str],
) -> CheckReport {
    let mut report = CheckReport::default();
    for zone in zones {
        let zone_report = check_zone(zone, profile, source, ignore_keys).await;
        if zone_report.passed {
            report.passed.push(zone.clone());
        } else {
            report.failed.push(zone.clone());
        }
        report.zones.push(zone_report);
    }
    report.passed.sort();
    report.failed.sort();
    report
}

/// Checks one zone across all record groups of the profile.
///
/// The zone verdict is the logical AND of all group results; individual
/// group diffs stay available for reporting.
pub async fn check_zone(
    zone: &str,
    profile: &Profile,
    source: &dyn RecordSource,
    ignore_keys: &[&str],
) -> ZoneReport {
    debug!("Checking zone {zone} against profile {:?}", profile.name);
    let mut groups = Vec::new();
    for group in &profile.groups {
        let diff = check_group(zone, group, source, ignore_keys).await;
        groups.push(GroupResult {
            name: group.name.clone(),
            diff,
        });
    }
    let passed = groups.iter().all(GroupResult::passed);
    ZoneReport {
        zone: zone.to_string(),
        groups,
        passed,
    }
}

/// Runs the queries a group requires and merges the sub-diffs.
///
/// Anonymous host lists query once at the zone apex; prefixed host sets
/// query once per `<prefix>.<zone>` and accumulate the per-prefix diffs into
/// one group diff.
async fn check_group(
    zone: &str,
    group: &Group,
    source: &dyn RecordSource,
    ignore_keys: &[&str],
) -> RecordDiff {
    match &group.hosts {
        HostSet::Zone(expected) => {
            check_records(expected, group.kind, zone, source, ignore_keys).await
        }
        HostSet::Prefixed(hosts) => {
            let mut merged = RecordDiff::default();
            for (prefix, record) in hosts {
                let hostname = qualify(prefix, zone);
                merged.merge(
                    check_records(
                        slice::from_ref(record),
                        group.kind,
                        &hostname,
                        source,
                        ignore_keys,
                    )
                    .await,
                );
            }
            merged
        }
    }
}

/// Fetches, normalizes and diffs one hostname's records.
///
/// Every expected record gets the queried hostname and the record type label
/// injected as `host` and `type` fields, mirroring the fields actual records
/// carry so both sides align after sorting. A transport-level lookup failure
/// is logged and treated as an empty answer, which surfaces every expected
/// record as missing.
async fn check_records(
    expected: &[ExpectedRecord],
    kind: RecordKind,
    hostname: &str,
    source: &dyn RecordSource,
    ignore_keys: &[&str],
) -> RecordDiff {
    let actual = match source.lookup(hostname, kind).await {
        Ok(records) => records,
        Err(e) => {
            warn!("{e}; treating the answer as empty");
            Vec::new()
        }
    };
    let mut actual = normalize(actual, ignore_keys);

    if kind == RecordKind::Txt {
        for entry in expected {
            actual = apply_txt_options(entry, actual);
        }
    }

    let expected_fields: Vec<Fields> = expected
        .iter()
        .map(|entry| {
            let mut fields = entry.fields.clone();
            fields.insert("host".into(), hostname.to_string());
            fields.insert("type".into(), kind.label().to_string());
            fields
        })
        .collect();
    let expected_fields = normalize(expected_fields, ignore_keys);

    diff(&expected_fields, &actual)
}

fn qualify(prefix: &str, zone: &str) -> String {
    if prefix.is_empty() {
        zone.to_string()
    } else {
        format!("{prefix}.{zone}")
    }
}

/// One raw probe answer: the hostname and kind queried plus the outcome.
#[derive(Debug)]
pub struct ProbeResult {
    /// Fully-qualified hostname the query was sent for.
    pub hostname: String,
    /// Record type queried.
    pub kind: RecordKind,
    /// Raw (pre-normalization) records, or the lookup failure.
    pub outcome: Result<Vec<Fields>, crate::error_handling::LookupError>,
}

/// The fixed query list the probe command walks for a zone.
const PROBE_QUERIES: &[(&str, RecordKind)] = &[
    ("", RecordKind::Mx),
    ("", RecordKind::Txt),
    ("autoconfig", RecordKind::Cname),
    ("autodiscover", RecordKind::Cname),
    ("_autodiscover._tcp", RecordKind::Srv),
    ("_carddavs._tcp", RecordKind::Txt),
];

/// Dumps the raw resolver answers for a zone's well-known mail hostnames.
///
/// Debugging aid: shows what the resolver actually returns before any
/// normalization or option transform is applied.
pub async fn probe_zone(zone: &str, source: &dyn RecordSource) -> Vec<ProbeResult> {
    let mut results = Vec::new();
    for &(prefix, kind) in PROBE_QUERIES {
        let hostname = qualify(prefix, zone);
        let outcome = source.lookup(&hostname, kind).await;
        results.push(ProbeResult {
            hostname,
            kind,
            outcome,
        });
    }
    results
}
