//! Shared data structures for record comparison and check reporting.

use std::collections::BTreeMap;

/// A DNS record as a field-name to value mapping.
///
/// The field set varies by record type: MX records carry `pri` and `target`,
/// SRV records carry `pri`, `weight`, `port` and `target`, TXT records carry
/// `txt`, CNAME records carry `target`. Every record returned by the resolver
/// adapter additionally carries `host`, `type`, `class` and `ttl`, of which
/// the bookkeeping fields (`class`, `ttl`) are stripped by the normalizer.
///
/// A `BTreeMap` keeps field order canonical by key, so two records compare
/// field-by-field without an extra canonicalization step.
pub type Fields = BTreeMap<String, String>;

/// The outcome of diffing an expected record set against an actual one.
///
/// `missing` holds expected-but-absent-or-mismatched fragments, `unknown`
/// holds present-but-unexpected-or-unmatched fragments. An empty diff on both
/// sides signals a pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDiff {
    /// Expected records (or fragments of them) not matched by the actual set.
    pub missing: Vec<Fields>,
    /// Actual records (or fragments of them) not covered by the expected set.
    pub unknown: Vec<Fields>,
}

impl RecordDiff {
    /// Returns `true` when neither missing nor unknown entries exist.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty()
    }

    /// Accumulates another diff into this one.
    ///
    /// Used by prefixed record groups, where one query runs per subdomain
    /// prefix and the sub-diffs combine into a single group result.
    pub fn merge(&mut self, other: RecordDiff) {
        self.missing.extend(other.missing);
        self.unknown.extend(other.unknown);
    }
}

/// The check result for one named record group of a zone.
#[derive(Debug, Clone)]
pub struct GroupResult {
    /// Group name from the expectation profile (e.g. "MX").
    pub name: String,
    /// Merged diff across all queries the group required.
    pub diff: RecordDiff,
}

impl GroupResult {
    /// A group passes iff its diff came back empty.
    pub fn passed(&self) -> bool {
        self.diff.is_empty()
    }
}

/// The verdict for one zone: per-group results plus the overall boolean.
#[derive(Debug, Clone)]
pub struct ZoneReport {
    /// The zone that was checked.
    pub zone: String,
    /// Per-group results, in profile order.
    pub groups: Vec<GroupResult>,
    /// Logical AND over all group results.
    pub passed: bool,
}

/// Results of a full run across all requested zones.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    /// Per-zone reports, in the order the zones were given.
    pub zones: Vec<ZoneReport>,
    /// Names of zones whose groups all passed, sorted lexicographically.
    pub passed: Vec<String>,
    /// Names of zones with at least one failing group, sorted lexicographically.
    pub failed: Vec<String>,
}
