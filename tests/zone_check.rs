//! End-to-end checks of the zone checker against an in-memory record source.

use std::collections::HashMap;

use async_trait::async_trait;
use zone_status::config::DEFAULT_IGNORED_KEYS;
use zone_status::error_handling::LookupError;
use zone_status::{profile, run_check, CheckReport, Fields, RecordKind, RecordSource};

/// In-memory record source mirroring the resolver adapter's answer shape.
#[derive(Default)]
struct StaticSource {
    answers: HashMap<(String, RecordKind), Vec<Fields>>,
}

impl StaticSource {
    fn add(&mut self, hostname: &str, kind: RecordKind, pairs: &[(&str, &str)]) {
        let mut fields: Fields = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        fields.insert("host".into(), hostname.to_string());
        fields.insert("type".into(), kind.label().to_string());
        fields.insert("class".into(), "IN".to_string());
        fields.insert("ttl".into(), "3600".to_string());
        self.answers
            .entry((hostname.to_string(), kind))
            .or_default()
            .push(fields);
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn lookup(&self, hostname: &str, kind: RecordKind) -> Result<Vec<Fields>, LookupError> {
        Ok(self
            .answers
            .get(&(hostname.to_string(), kind))
            .cloned()
            .unwrap_or_default())
    }
}

/// Populates a source with a complete, correct mail setup for `zone`.
fn populate_compliant_zone(source: &mut StaticSource, zone: &str) {
    source.add(zone, RecordKind::Mx, &[("pri", "10"), ("target", "mail.gilbertsoft.email")]);
    source.add(
        zone,
        RecordKind::Mx,
        &[("pri", "20"), ("target", "mxbackup1.junkemailfilter.com")],
    );
    source.add(
        zone,
        RecordKind::Mx,
        &[("pri", "30"), ("target", "mxbackup2.junkemailfilter.com")],
    );

    for prefix in ["autoconfig", "autodiscover"] {
        source.add(
            &format!("{prefix}.{zone}"),
            RecordKind::Cname,
            &[("target", "mail.gilbertsoft.email")],
        );
    }

    for (prefix, port) in [
        ("_imap._tcp", "143"),
        ("_imaps._tcp", "993"),
        ("_submission._tcp", "587"),
        ("_smtps._tcp", "465"),
        ("_autodiscover._tcp", "443"),
        ("_carddavs._tcp", "443"),
        ("_caldavs._tcp", "443"),
    ] {
        source.add(
            &format!("{prefix}.{zone}"),
            RecordKind::Srv,
            &[
                ("pri", "0"),
                ("weight", "1"),
                ("port", port),
                ("target", "mail.gilbertsoft.email"),
            ],
        );
    }

    source.add(zone, RecordKind::Txt, &[("txt", "v=spf1 redirect=gilbertsoft.net")]);
    // unrelated apex TXT entry, filtered by the explicit_prefix option
    source.add(zone, RecordKind::Txt, &[("txt", "google-site-verification=xyz")]);
    for prefix in ["_carddavs._tcp", "_caldavs._tcp"] {
        source.add(
            &format!("{prefix}.{zone}"),
            RecordKind::Txt,
            &[("txt", "path=/SOGo/dav/")],
        );
    }
    source.add(
        &format!("_dmarc.{zone}"),
        RecordKind::Txt,
        &[("txt", "v=DMARC1; p=reject")],
    );
    // full DKIM key; the expectation only pins the preamble via shorten_to_length
    source.add(
        &format!("dkim._domainkey.{zone}"),
        RecordKind::Txt,
        &[("txt", "v=DKIM1;k=rsa;t=s;s=email;p=MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8A")],
    );
}

/// Mirrors evaluate_exit_code from src/main.rs.
fn evaluate_exit_code(report: &CheckReport) -> i32 {
    if report.failed.is_empty() {
        0
    } else {
        1
    }
}

#[tokio::test]
async fn test_compliant_zone_passes_all_groups() {
    let mut source = StaticSource::default();
    populate_compliant_zone(&mut source, "example.com");

    let report = run_check(
        &["example.com".to_string()],
        &profile::mail(),
        &source,
        DEFAULT_IGNORED_KEYS,
    )
    .await;

    let zone = &report.zones[0];
    for group in &zone.groups {
        assert!(
            group.passed(),
            "group {} should pass, diff: {:?}",
            group.name,
            group.diff
        );
    }
    assert!(zone.passed);
    assert_eq!(report.passed, ["example.com"]);
    assert!(report.failed.is_empty());
    assert_eq!(evaluate_exit_code(&report), 0);
}

#[tokio::test]
async fn test_missing_backup_mx_fails_only_the_mx_group() {
    let mut source = StaticSource::default();
    populate_compliant_zone(&mut source, "example.com");
    // drop the priority-30 backup
    source
        .answers
        .get_mut(&("example.com".to_string(), RecordKind::Mx))
        .unwrap()
        .retain(|record| record.get("pri").map(String::as_str) != Some("30"));

    let report = run_check(
        &["example.com".to_string()],
        &profile::mail(),
        &source,
        DEFAULT_IGNORED_KEYS,
    )
    .await;

    let zone = &report.zones[0];
    assert!(!zone.passed);
    let mx = zone.groups.iter().find(|g| g.name == "MX").unwrap();
    assert_eq!(mx.diff.missing.len(), 1);
    assert_eq!(
        mx.diff.missing[0].get("target").map(String::as_str),
        Some("mxbackup2.junkemailfilter.com")
    );
    assert!(mx.diff.unknown.is_empty());

    // the other groups are unaffected
    for group in zone.groups.iter().filter(|g| g.name != "MX") {
        assert!(group.passed(), "group {} should still pass", group.name);
    }
    assert_eq!(report.failed, ["example.com"]);
    assert_eq!(evaluate_exit_code(&report), 1);
}

#[tokio::test]
async fn test_failing_zone_is_listed_only_as_failed() {
    let mut source = StaticSource::default();
    populate_compliant_zone(&mut source, "good.example");
    // bad.example gets no records at all

    let report = run_check(
        &["bad.example".to_string(), "good.example".to_string()],
        &profile::mail(),
        &source,
        DEFAULT_IGNORED_KEYS,
    )
    .await;

    assert_eq!(report.passed, ["good.example"]);
    assert_eq!(report.failed, ["bad.example"]);
    assert!(!report.passed.contains(&"bad.example".to_string()));
}

#[tokio::test]
async fn test_wrong_dkim_key_type_is_reported() {
    let mut source = StaticSource::default();
    populate_compliant_zone(&mut source, "example.com");
    let dkim = source
        .answers
        .get_mut(&("dkim._domainkey.example.com".to_string(), RecordKind::Txt))
        .unwrap();
    dkim.clear();
    let mut fields: Fields = [("txt".to_string(), "v=DKIM1;k=ed25519;p=abc".to_string())].into();
    fields.insert("host".into(), "dkim._domainkey.example.com".into());
    fields.insert("type".into(), "TXT".into());
    fields.insert("class".into(), "IN".into());
    fields.insert("ttl".into(), "3600".into());
    dkim.push(fields);

    let report = run_check(
        &["example.com".to_string()],
        &profile::mail(),
        &source,
        DEFAULT_IGNORED_KEYS,
    )
    .await;

    let zone = &report.zones[0];
    let txt = zone.groups.iter().find(|g| g.name == "TXT").unwrap();
    assert!(!txt.passed());
    assert!(txt
        .diff
        .missing
        .iter()
        .any(|fragment| fragment.get("txt").map(String::as_str)
            == Some("v=DKIM1;k=rsa;t=s;s=email;p=")));
}
