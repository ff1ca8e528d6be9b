//! Resolver adapter: turns DNS answers into field-name to value records.
//!
//! The rest of the crate only sees the [`RecordSource`] trait, which returns
//! records in the same shape for every record type. The production
//! implementation wraps `hickory-resolver`; tests substitute an in-memory
//! source.

use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::error_handling::LookupError;
use crate::models::Fields;

/// DNS record types the checker knows how to fetch and compare.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, serde::Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    Mx,
    Cname,
    Srv,
    Txt,
}

impl RecordKind {
    /// The DNS type label, e.g. `"MX"`.
    ///
    /// This label is injected as the `type` field into both expected and
    /// actual records, so the two sides align after sorting.
    pub fn label(self) -> &'static str {
        self.into()
    }

    fn record_type(self) -> RecordType {
        match self {
            RecordKind::Mx => RecordType::MX,
            RecordKind::Cname => RecordType::CNAME,
            RecordKind::Srv => RecordType::SRV,
            RecordKind::Txt => RecordType::TXT,
        }
    }
}

/// A source of DNS records, keyed by hostname and record type.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches all records of `kind` at `hostname`.
    ///
    /// Returns an empty sequence when no records exist. A `LookupError` means
    /// the query itself failed (timeout, unreachable nameserver), which the
    /// zone checker logs and then treats as an empty answer.
    async fn lookup(&self, hostname: &str, kind: RecordKind) -> Result<Vec<Fields>, LookupError>;
}

/// The production [`RecordSource`] backed by `hickory-resolver`.
pub struct DnsRecordSource {
    resolver: Arc<TokioAsyncResolver>,
}

impl DnsRecordSource {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        DnsRecordSource { resolver }
    }
}

#[async_trait]
impl RecordSource for DnsRecordSource {
    async fn lookup(&self, hostname: &str, kind: RecordKind) -> Result<Vec<Fields>, LookupError> {
        let lookup = match self.resolver.lookup(hostname, kind.record_type()).await {
            Ok(lookup) => lookup,
            // NXDOMAIN and empty answers are a normal outcome, not a failure
            Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(LookupError::Query {
                    hostname: hostname.to_string(),
                    kind,
                    source: e,
                });
            }
        };

        let mut records = Vec::new();
        for record in lookup.record_iter() {
            let Some(rdata) = record.data() else {
                continue;
            };
            let Some(mut fields) = fields_from_rdata(rdata) else {
                continue;
            };
            fields.insert("host".into(), canonical_name(hostname));
            fields.insert("type".into(), kind.label().to_string());
            fields.insert("class".into(), record.dns_class().to_string());
            fields.insert("ttl".into(), record.ttl().to_string());
            records.push(fields);
        }
        Ok(records)
    }
}

/// Extracts the type-specific fields from a resolver answer.
///
/// Field names mirror the record shape the comparison engine expects: `pri`
/// rather than `preference`, `txt` for the joined text data. Answers of a
/// type the checker does not compare (e.g. a CNAME returned while chasing an
/// MX target) are skipped.
fn fields_from_rdata(rdata: &RData) -> Option<Fields> {
    let mut fields = Fields::new();
    match rdata {
        RData::MX(mx) => {
            fields.insert("pri".into(), mx.preference().to_string());
            fields.insert("target".into(), canonical_name(&mx.exchange().to_utf8()));
        }
        RData::CNAME(cname) => {
            fields.insert("target".into(), canonical_name(&cname.0.to_utf8()));
        }
        RData::SRV(srv) => {
            fields.insert("pri".into(), srv.priority().to_string());
            fields.insert("weight".into(), srv.weight().to_string());
            fields.insert("port".into(), srv.port().to_string());
            fields.insert("target".into(), canonical_name(&srv.target().to_utf8()));
        }
        RData::TXT(txt) => {
            // TXT data can be split across multiple byte slices, join them
            let parts: Result<Vec<String>, _> = txt
                .iter()
                .map(|bytes| String::from_utf8(bytes.to_vec()))
                .collect();
            fields.insert("txt".into(), parts.ok()?.join(""));
        }
        _ => return None,
    }
    Some(fields)
}

/// Lowercases a DNS name and strips the trailing root dot, so resolver
/// answers compare equal to profile-authored names.
fn canonical_name(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}
