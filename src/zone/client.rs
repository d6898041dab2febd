use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::AppError;
use crate::zone::ZoneStore;
use crate::zone::types::{Record, ZoneInfo, ZoneReadResponse, ZoneSnapshot, ZoneWriteRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the managed DNS API, bound to a single resolved zone.
#[derive(Clone, Debug)]
pub struct ManagedDnsClient {
    http: Client,
    base_url: String, // e.g. "https://dns.example.net/api/v1"
    api_key: String,
    zone_id: String,
    zone_name: String,
}

impl ManagedDnsClient {
    /// Resolve `zone_name` against the remote zone listing and return a
    /// client bound to its identifier. A missing zone is fatal: the webhook
    /// must not start without a resolved zone.
    pub async fn connect(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        zone_name: impl Into<String>,
    ) -> Result<Self, AppError> {
        let base_url = base_url.into();
        let api_key = api_key.into();
        let zone_name = zone_name.into();

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AppError::internal)?;

        let url = format!("{}/zones", base_url.trim_end_matches('/'));
        let res = http.get(&url).header("X-API-Key", &api_key).send().await?;
        if !res.status().is_success() {
            return Err(AppError::remote(format!(
                "zone listing failed with {}",
                res.status()
            )));
        }
        let zones: Vec<ZoneInfo> = res.json().await?;

        let zone_id = zones
            .into_iter()
            .find(|z| z.name == zone_name)
            .map(|z| z.id)
            .ok_or_else(|| AppError::ZoneNotFound(zone_name.clone()))?;

        info!(zone = %zone_name, id = %zone_id, "resolved managed zone");

        Ok(Self {
            http,
            base_url,
            api_key,
            zone_id,
            zone_name,
        })
    }

    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-API-Key", &self.api_key)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl ZoneStore for ManagedDnsClient {
    async fn read_zone(&self) -> Result<ZoneSnapshot, AppError> {
        let url = self.url(&format!("zones/{}", self.zone_id));
        let res = self.auth(self.http.get(url)).send().await?;
        if !res.status().is_success() {
            return Err(AppError::remote(format!(
                "zone read failed with {}",
                res.status()
            )));
        }
        let body: ZoneReadResponse = res.json().await?;
        debug!(zone = %self.zone_name, records = body.records.len(), "read zone snapshot");

        Ok(ZoneSnapshot {
            records: body.records,
            settings_fingerprint: body.settings_fingerprint,
        })
    }

    async fn write_zone(
        &self,
        records: &[Record],
        fingerprint: Option<&str>,
    ) -> Result<(), AppError> {
        let url = self.url(&format!("zones/{}", self.zone_id));
        let body = ZoneWriteRequest {
            records,
            settings_fingerprint: fingerprint,
        };
        let res = self.auth(self.http.put(url)).json(&body).send().await?;

        match res.status() {
            s if s.is_success() => {
                debug!(zone = %self.zone_name, records = records.len(), "wrote zone records");
                Ok(())
            }
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => Err(AppError::conflict(
                format!("zone write rejected with {}", res.status()),
            )),
            s => Err(AppError::remote(format!("zone write failed with {s}"))),
        }
    }
}
