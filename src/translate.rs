//! Conversion between controller endpoints and provider records.

use tracing::warn;

use crate::config::AppConfig;
use crate::endpoint::{Endpoint, ProviderSpecific};
use crate::zone::types::{Record, RecordType};

/// TTL applied when the controller leaves it unspecified.
pub const DEFAULT_TTL: u32 = 3600;

#[derive(thiserror::Error, Debug)]
pub enum TranslateError {
    #[error("endpoint has no DNS name")]
    MissingName,
    #[error("unsupported record type '{0}'")]
    UnsupportedType(String),
}

/// Converts between controller endpoints and provider records for one zone.
/// Both directions are idempotent: trimming never touches names outside the
/// zone, and appending the suffix never doubles it.
#[derive(Debug, Clone)]
pub struct Translator {
    zone_suffix: String, // "." + zone root
    txt_prefix: String,
}

impl Translator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            zone_suffix: config.zone_suffix(),
            txt_prefix: config.txt_prefix.clone(),
        }
    }

    /// Convert one endpoint into a provider record.
    ///
    /// TXT endpoints under the registry prefix stay TXT regardless of other
    /// signals; a CNAME carrying `alias=true` becomes an ALIAS. The name is
    /// made zone-relative, targets are normalized per record type, and a
    /// missing or non-positive TTL falls back to the default.
    pub fn to_record(&self, ep: &Endpoint) -> Result<Record, TranslateError> {
        if ep.dns_name.is_empty() {
            return Err(TranslateError::MissingName);
        }

        let declared: RecordType = ep
            .record_type
            .parse()
            .map_err(|_| TranslateError::UnsupportedType(ep.record_type.clone()))?;

        let rtype = if declared == RecordType::TXT && ep.dns_name.starts_with(&self.txt_prefix) {
            // Registry bookkeeping entries are always stored as TXT.
            RecordType::TXT
        } else if declared == RecordType::CNAME && ep.is_alias() {
            RecordType::ALIAS
        } else {
            declared
        };

        let name = self.trim_zone_suffix(&ep.dns_name);

        let targets = ep
            .targets
            .iter()
            .map(|t| normalize_target(rtype, t))
            .collect();

        let ttl = u32::try_from(ep.record_ttl)
            .ok()
            .filter(|ttl| *ttl > 0)
            .unwrap_or(DEFAULT_TTL);

        Ok(Record {
            rtype,
            name,
            targets,
            ttl,
        })
    }

    /// Convert a zone record back into a controller endpoint. ALIAS records
    /// surface as CNAME plus the `alias=true` flag; targets and TTL pass
    /// through unchanged.
    pub fn to_endpoint(&self, rec: &Record) -> Endpoint {
        let dns_name = if rec.name.ends_with(&self.zone_suffix) {
            rec.name.clone()
        } else {
            format!("{}{}", rec.name, self.zone_suffix)
        };

        let (record_type, provider_specific) = match rec.rtype {
            RecordType::ALIAS => (
                RecordType::CNAME.to_string(),
                vec![ProviderSpecific {
                    name: "alias".into(),
                    value: "true".into(),
                }],
            ),
            other => (other.to_string(), Vec::new()),
        };

        Endpoint {
            dns_name,
            record_type,
            targets: rec.targets.clone(),
            record_ttl: i64::from(rec.ttl),
            provider_specific,
            labels: Default::default(),
        }
    }

    /// Translate a batch of endpoints, skipping entries that fail validation
    /// instead of emitting zero-value records.
    pub fn to_records(&self, endpoints: &[Endpoint]) -> Vec<Record> {
        let mut records = Vec::with_capacity(endpoints.len());
        for ep in endpoints {
            match self.to_record(ep) {
                Ok(rec) => records.push(rec),
                Err(err) => warn!(dns_name = %ep.dns_name, %err, "skipping endpoint"),
            }
        }
        records
    }

    /// Translate every zone record; always returns a concrete, possibly empty
    /// list.
    pub fn to_endpoints(&self, records: &[Record]) -> Vec<Endpoint> {
        records.iter().map(|rec| self.to_endpoint(rec)).collect()
    }

    /// Strip the zone suffix only when the name actually ends with it, then
    /// one trailing dot if any is left. Names outside the zone pass through
    /// untouched.
    fn trim_zone_suffix(&self, name: &str) -> String {
        let name = name.strip_suffix(&self.zone_suffix).unwrap_or(name);
        name.strip_suffix('.').unwrap_or(name).to_string()
    }
}

fn normalize_target(rtype: RecordType, target: &str) -> String {
    match rtype {
        // One layer of surrounding quotes comes off TXT payloads.
        RecordType::TXT => target
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(target)
            .to_string(),
        // CNAME and ALIAS targets must be absolute.
        RecordType::CNAME | RecordType::ALIAS => {
            if target.ends_with('.') {
                target.to_string()
            } else {
                format!("{target}.")
            }
        }
        _ => target.to_string(),
    }
}
