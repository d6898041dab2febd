//! Wire types of the ExternalDNS webhook contract.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A provider-specific property attached to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpecific {
    pub name: String,
    pub value: String,
}

/// One DNS endpoint as the ExternalDNS controller understands it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub dns_name: String,
    pub record_type: String,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default, rename = "recordTTL")]
    pub record_ttl: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_specific: Vec<ProviderSpecific>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

impl Endpoint {
    /// Look up a provider-specific property by name.
    pub fn provider_specific(&self, name: &str) -> Option<&str> {
        self.provider_specific
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Whether this endpoint carries the `alias=true` flag marking a CNAME
    /// that the provider should store as an ALIAS record.
    pub fn is_alias(&self) -> bool {
        self.provider_specific("alias") == Some("true")
    }
}

/// The change payload the controller sends to POST /records. In-place updates
/// arrive as `updateOld`/`updateNew` pairs next to plain creates and deletes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Changes {
    #[serde(default)]
    pub create: Vec<Endpoint>,
    #[serde(default)]
    pub update_old: Vec<Endpoint>,
    #[serde(default)]
    pub update_new: Vec<Endpoint>,
    #[serde(default)]
    pub delete: Vec<Endpoint>,
}

/// Negotiation response for GET /, declaring the managed zone and the record
/// types this provider handles.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainFilter {
    pub domain_filter: Vec<String>,
    pub record_types: Vec<String>,
}
