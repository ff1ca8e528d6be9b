//! The diff engine: structural difference between two normalized record sets.
//!
//! Records are matched by their natural key first (`target`, else `txt`), so
//! one extra or absent record produces one clean missing/unknown entry
//! instead of shifting every later comparison. Records without a natural key
//! fall back to positional pairing in sorted order.

use crate::models::{Fields, RecordDiff};

/// Computes the asymmetric structural difference between an expected and an
/// actual record sequence.
///
/// Both inputs must already be normalized (see [`crate::normalize`]).
///
/// For each matched pair, only the fields that are absent from or differ on
/// the other side are kept: the expected-side fragment goes to `missing`, the
/// actual-side fragment to `unknown`. Expected records with no counterpart
/// appear whole in `missing`; actual records with no counterpart appear whole
/// in `unknown`. `diff(a, a)` is empty for any normalized `a`.
pub fn diff(expected: &[Fields], actual: &[Fields]) -> RecordDiff {
    let mut claimed = vec![false; actual.len()];
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let mut unmatched: Vec<usize> = Vec::new();

    // First pass: claim actual records by natural key.
    for (i, exp) in expected.iter().enumerate() {
        let hit = natural_key(exp).and_then(|(key, value)| {
            (0..actual.len())
                .find(|&j| !claimed[j] && actual[j].get(key).map(String::as_str) == Some(value))
        });
        match hit {
            Some(j) => {
                claimed[j] = true;
                pairs.push((i, j));
            }
            None => unmatched.push(i),
        }
    }

    // Second pass: pair the leftovers positionally, in sorted order.
    let leftovers: Vec<usize> = (0..actual.len()).filter(|&j| !claimed[j]).collect();
    let paired = unmatched.len().min(leftovers.len());
    pairs.extend(
        unmatched[..paired]
            .iter()
            .copied()
            .zip(leftovers[..paired].iter().copied()),
    );

    let mut missing: Vec<(usize, Fields)> = Vec::new();
    let mut unknown: Vec<(usize, Fields)> = Vec::new();

    for &(i, j) in &pairs {
        let exp_fragment = fragment(&expected[i], &actual[j]);
        if !exp_fragment.is_empty() {
            missing.push((i, exp_fragment));
        }
        let act_fragment = fragment(&actual[j], &expected[i]);
        if !act_fragment.is_empty() {
            unknown.push((j, act_fragment));
        }
    }
    for &i in &unmatched[paired..] {
        missing.push((i, expected[i].clone()));
    }
    for &j in &leftovers[paired..] {
        unknown.push((j, actual[j].clone()));
    }

    // Report entries in their original sequence order.
    missing.sort_by_key(|&(i, _)| i);
    unknown.sort_by_key(|&(j, _)| j);

    RecordDiff {
        missing: missing.into_iter().map(|(_, f)| f).collect(),
        unknown: unknown.into_iter().map(|(_, f)| f).collect(),
    }
}

/// The field a record is naturally identified by: `target` for MX/CNAME/SRV
/// shaped records, `txt` for TXT shaped ones.
fn natural_key(fields: &Fields) -> Option<(&'static str, &str)> {
    if let Some(value) = fields.get("target") {
        return Some(("target", value));
    }
    if let Some(value) = fields.get("txt") {
        return Some(("txt", value));
    }
    None
}

/// The fields of `left` that `right` does not match: absent keys keep their
/// whole value, present keys are kept only when the values differ.
fn fragment(left: &Fields, right: &Fields) -> Fields {
    let mut out = Fields::new();
    for (key, value) in left {
        if right.get(key) != Some(value) {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}
