//! Record normalization: the step both record sets pass through before any
//! diff is computed.
//!
//! Normalization projects away ignorable fields and sorts the sequence into
//! a canonical order. The diff engine never sees raw, unsorted or unfiltered
//! data; the invariant is that expected and actual sets are normalized
//! identically and independently.

use std::cmp::Ordering;

use crate::models::Fields;
use crate::profile::ExpectedRecord;

/// Strips ignorable fields from every record and sorts the sequence.
///
/// Field removal is a projection, not a record filter: a record never
/// disappears here, it only loses fields named in `ignore_keys`. The sort is
/// stable, so records without a natural sort key keep their resolver order
/// and the output stays deterministic.
pub fn normalize(mut records: Vec<Fields>, ignore_keys: &[&str]) -> Vec<Fields> {
    for record in &mut records {
        record.retain(|key, _| !ignore_keys.contains(&key.as_str()));
    }
    records.sort_by(compare_records);
    records
}

/// Canonical record order: by `target` when both records have one, else by
/// `txt` when both have one, else equal.
fn compare_records(a: &Fields, b: &Fields) -> Ordering {
    if let (Some(a), Some(b)) = (a.get("target"), b.get("target")) {
        return a.cmp(b);
    }
    if let (Some(a), Some(b)) = (a.get("txt"), b.get("txt")) {
        return a.cmp(b);
    }
    Ordering::Equal
}

/// Applies an expected TXT entry's comparison options to the actual set.
///
/// `explicit_prefix` drops actual records whose `txt` value does not start
/// with the given prefix; `shorten_to_length` truncates surviving values to
/// the expected value's length. Only invoked for TXT groups; entries without
/// options pass the actual set through unchanged.
pub fn apply_txt_options(expected: &ExpectedRecord, mut actual: Vec<Fields>) -> Vec<Fields> {
    let Some(options) = &expected.options else {
        return actual;
    };

    if let Some(prefix) = &options.explicit_prefix {
        actual.retain(|record| {
            record
                .get("txt")
                .is_some_and(|txt| txt.starts_with(prefix.as_str()))
        });
    }

    if options.shorten_to_length {
        if let Some(expected_txt) = expected.fields.get("txt") {
            let limit = expected_txt.len();
            for record in &mut actual {
                if let Some(txt) = record.get_mut("txt") {
                    truncate_to(txt, limit);
                }
            }
        }
    }

    actual
}

// TXT data is normally ASCII, but never split a multi-byte character.
fn truncate_to(value: &mut String, limit: usize) {
    if value.len() <= limit {
        return;
    }
    let mut end = limit;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    value.truncate(end);
}
