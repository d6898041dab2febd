use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Record types the managed zone can hold. ALIAS is first-class here; the
/// controller side represents it as CNAME plus a provider-specific flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    ALIAS,
    TXT,
    NS,
    MX,
    SRV,
    CAA,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::ALIAS => "ALIAS",
            RecordType::TXT => "TXT",
            RecordType::NS => "NS",
            RecordType::MX => "MX",
            RecordType::SRV => "SRV",
            RecordType::CAA => "CAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = UnknownRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "CNAME" => Ok(RecordType::CNAME),
            "ALIAS" => Ok(RecordType::ALIAS),
            "TXT" => Ok(RecordType::TXT),
            "NS" => Ok(RecordType::NS),
            "MX" => Ok(RecordType::MX),
            "SRV" => Ok(RecordType::SRV),
            "CAA" => Ok(RecordType::CAA),
            other => Err(UnknownRecordType(other.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unknown record type '{0}'")]
pub struct UnknownRecordType(pub String);

/// A provider-native DNS record. The name is relative to the zone (no zone
/// suffix, no trailing dot); the TTL is always concrete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub rtype: RecordType,
    pub name: String,
    pub targets: Vec<String>,
    pub ttl: u32,
}

impl Record {
    /// First target value, the key used when matching delete requests.
    pub fn first_target(&self) -> &str {
        self.targets.first().map(String::as_str).unwrap_or("")
    }
}

/// Full zone state as read from the managed DNS API, together with the opaque
/// settings fingerprint the write call must carry back unmodified.
#[derive(Debug, Clone, Default)]
pub struct ZoneSnapshot {
    pub records: Vec<Record>,
    pub settings_fingerprint: Option<String>,
}

/// A requested mutation against the zone, already in provider shape.
#[derive(Debug, Default, Clone)]
pub struct ChangeSet {
    pub create: Vec<Record>,
    pub delete: Vec<Record>,
}

// Wire shapes of the managed DNS API.

/// One entry in the zone listing used to resolve the zone identifier.
#[derive(Debug, Deserialize)]
pub struct ZoneInfo {
    pub id: String,
    pub name: String,
}

/// GET /zones/{id} response body.
#[derive(Debug, Deserialize)]
pub struct ZoneReadResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub settings_fingerprint: Option<String>,
}

/// PUT /zones/{id} request body; the record list replaces the zone wholesale.
#[derive(Debug, Serialize)]
pub struct ZoneWriteRequest<'a> {
    pub records: &'a [Record],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_fingerprint: Option<&'a str>,
}
