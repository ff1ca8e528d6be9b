//! Expectation profiles: what a zone's DNS configuration should look like.
//!
//! A profile is an ordered list of record groups, each naming a DNS record
//! type and the records expected for the zone (or for subdomain prefixes of
//! it). The built-in `mail` profile describes a mail-hosting setup; custom
//! profiles load from a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error_handling::ProfileError;
use crate::models::Fields;
use crate::resolver::RecordKind;

/// Per-field comparison options for TXT records.
///
/// Unknown option names are unrepresentable here; profile files that carry
/// one are rejected at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TxtOptions {
    /// Drop actual records whose `txt` value does not start with this prefix.
    /// Used to single out e.g. the SPF record among unrelated TXT entries.
    #[serde(default)]
    pub explicit_prefix: Option<String>,

    /// Truncate actual `txt` values to the length of the expected value,
    /// enabling prefix-only comparisons such as checking a DKIM preamble
    /// without pinning the full key.
    #[serde(default)]
    pub shorten_to_length: bool,
}

/// One expected record: its fields plus optional TXT comparison options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedRecord {
    /// Field-name to value mapping, same shape as resolver answers.
    pub fields: Fields,
    /// TXT-only comparison options, if any.
    pub options: Option<TxtOptions>,
}

impl ExpectedRecord {
    /// Builds an expected record from field pairs.
    pub fn new<K, V, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ExpectedRecord {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            options: None,
        }
    }

    /// Attaches TXT comparison options.
    pub fn with_options(mut self, options: TxtOptions) -> Self {
        self.options = Some(options);
        self
    }
}

/// Profile field values may be JSON strings or numbers; both normalize to
/// strings so they compare against resolver answers uniformly.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    fn into_string(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Integer(n) => n.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for ExpectedRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            #[serde(default)]
            options: Option<TxtOptions>,
            #[serde(flatten)]
            fields: BTreeMap<String, FieldValue>,
        }

        let repr = Repr::deserialize(deserializer)?;
        Ok(ExpectedRecord {
            fields: repr
                .fields
                .into_iter()
                .map(|(k, v)| (k, v.into_string()))
                .collect(),
            options: repr.options,
        })
    }
}

/// Where a group's expected records live relative to the zone.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum HostSet {
    /// An anonymous list, queried once at the zone apex.
    Zone(Vec<ExpectedRecord>),
    /// One record per subdomain prefix, queried once per `<prefix>.<zone>`.
    /// The empty prefix means the apex itself.
    Prefixed(BTreeMap<String, ExpectedRecord>),
}

/// A named set of expected records of one DNS type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    /// Display name, conventionally the record type label.
    pub name: String,
    /// DNS record type to query.
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// The expected records.
    pub hosts: HostSet,
}

/// A full expectation profile for a service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Profile name, used in log output only.
    #[serde(default)]
    pub name: String,
    /// Record groups, checked in order.
    pub groups: Vec<Group>,
}

/// Looks up a built-in profile by name.
pub fn by_name(name: &str) -> Result<Profile, ProfileError> {
    match name {
        "mail" => Ok(mail()),
        other => Err(ProfileError::UnknownProfile(other.to_string())),
    }
}

/// Loads a profile from a JSON file.
pub fn load_file(path: &Path) -> Result<Profile, ProfileError> {
    let text = fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

const MAIL_HOST: &str = "mail.gilbertsoft.email";

fn srv(port: &str) -> ExpectedRecord {
    ExpectedRecord::new([
        ("pri", "0"),
        ("weight", "1"),
        ("port", port),
        ("target", MAIL_HOST),
    ])
}

/// The built-in expectation profile for the mail-hosting setup: primary and
/// backup MX records, autoconfig/autodiscover CNAMEs, client-discovery SRV
/// records and the SPF/DMARC/DKIM/dav-path TXT records.
pub fn mail() -> Profile {
    Profile {
        name: "mail".into(),
        groups: vec![
            Group {
                name: "MX".into(),
                kind: RecordKind::Mx,
                hosts: HostSet::Zone(vec![
                    ExpectedRecord::new([("pri", "10"), ("target", MAIL_HOST)]),
                    ExpectedRecord::new([
                        ("pri", "20"),
                        ("target", "mxbackup1.junkemailfilter.com"),
                    ]),
                    ExpectedRecord::new([
                        ("pri", "30"),
                        ("target", "mxbackup2.junkemailfilter.com"),
                    ]),
                ]),
            },
            Group {
                name: "CNAME".into(),
                kind: RecordKind::Cname,
                hosts: HostSet::Prefixed(BTreeMap::from([
                    (
                        "autoconfig".to_string(),
                        ExpectedRecord::new([("target", MAIL_HOST)]),
                    ),
                    (
                        "autodiscover".to_string(),
                        ExpectedRecord::new([("target", MAIL_HOST)]),
                    ),
                ])),
            },
            Group {
                name: "SRV".into(),
                kind: RecordKind::Srv,
                hosts: HostSet::Prefixed(BTreeMap::from([
                    ("_imap._tcp".to_string(), srv("143")),
                    ("_imaps._tcp".to_string(), srv("993")),
                    ("_submission._tcp".to_string(), srv("587")),
                    ("_smtps._tcp".to_string(), srv("465")),
                    ("_autodiscover._tcp".to_string(), srv("443")),
                    ("_carddavs._tcp".to_string(), srv("443")),
                    ("_caldavs._tcp".to_string(), srv("443")),
                ])),
            },
            Group {
                name: "TXT".into(),
                kind: RecordKind::Txt,
                hosts: HostSet::Prefixed(BTreeMap::from([
                    (
                        String::new(),
                        ExpectedRecord::new([("txt", "v=spf1 redirect=gilbertsoft.net")])
                            .with_options(TxtOptions {
                                explicit_prefix: Some("v=spf".into()),
                                shorten_to_length: false,
                            }),
                    ),
                    (
                        "_carddavs._tcp".to_string(),
                        ExpectedRecord::new([("txt", "path=/SOGo/dav/")]),
                    ),
                    (
                        "_caldavs._tcp".to_string(),
                        ExpectedRecord::new([("txt", "path=/SOGo/dav/")]),
                    ),
                    (
                        "_dmarc".to_string(),
                        ExpectedRecord::new([("txt", "v=DMARC1; p=reject")]),
                    ),
                    (
                        "dkim._domainkey".to_string(),
                        ExpectedRecord::new([("txt", "v=DKIM1;k=rsa;t=s;s=email;p=")])
                            .with_options(TxtOptions {
                                explicit_prefix: None,
                                shorten_to_length: true,
                            }),
                    ),
                ])),
            },
        ],
    }
}
