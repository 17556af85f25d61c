use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::provider::{
    Credentials, DnsProvider, Record, RecordUpdate, ResponseEnvelope, Zone, RECORD_TTL,
};
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RECORDS_PER_PAGE: &str = "20";

pub struct CloudflareProvider {
    client: Client,
    credentials: Credentials,
    api_base: String,
}

impl CloudflareProvider {
    pub fn with_base_url(credentials: Credentials, api_base: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            credentials,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        })
    }

    /// Authenticated request against `path` under the API base.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header("X-Auth-Email", &self.credentials.email)
            .header("X-Auth-Key", &self.credentials.api_key)
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send a request and unwrap the response envelope.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        let response = request.send().await?;

        let status = response.status();
        tracing::debug!("Cloudflare responded with {}", status);

        let body = response.text().await?;
        let envelope: ResponseEnvelope<T> = serde_json::from_str(&body)?;
        envelope.into_result()
    }
}

impl fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("email", &self.credentials.email)
            .field("api_key", &"<REDACTED>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn resolve_zone(&self, domain: &str) -> Result<String> {
        tracing::debug!("Looking up zone for {}", domain);

        let request = self.request(Method::GET, "/zones").query(&[
            ("name", domain),
            ("status", "active"),
            ("page", "1"),
            ("per_page", "1"),
            ("order", "status"),
            ("direction", "desc"),
            ("match", "all"),
        ]);

        let zones: Vec<Zone> = self.execute(request).await?.unwrap_or_default();

        let zone = zones
            .into_iter()
            .next()
            .ok_or_else(|| Error::ZoneNotFound(domain.to_string()))?;

        tracing::debug!("Found zone {} ({})", zone.id, zone.name);
        Ok(zone.id)
    }

    async fn list_records(&self, zone_id: &str, name: &str) -> Result<Vec<Record>> {
        let request = self
            .request(Method::GET, &format!("/zones/{}/dns_records", zone_id))
            .query(&[
                ("name", name),
                ("page", "1"),
                ("per_page", RECORDS_PER_PAGE),
                ("order", "type"),
                ("direction", "desc"),
                ("match", "all"),
            ]);

        let records: Vec<Record> = self.execute(request).await?.unwrap_or_default();
        tracing::debug!("Found {} records named {}", records.len(), name);
        Ok(records)
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record_type: &str,
        name: &str,
        content: &str,
    ) -> Result<()> {
        let payload = RecordUpdate {
            id: record_id,
            content,
            record_type,
            name,
            ttl: RECORD_TTL,
        };

        let request = self
            .request(
                Method::PUT,
                &format!("/zones/{}/dns_records/{}", zone_id, record_id),
            )
            .json(&payload);

        self.execute::<serde_json::Value>(request).await?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
