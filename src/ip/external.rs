use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{AddressSource, IpVersion};
use crate::config::Settings;
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Echo service exposing `v4.<host>` and `v6.<host>` endpoints that answer
/// with the caller's address as plain text.
pub struct ExternalSource {
    client: Client,
    host: String,
    scheme: &'static str,
}

impl ExternalSource {
    pub fn new(host: impl Into<String>, use_ssl: bool) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            host: host.into(),
            scheme: if use_ssl { "https" } else { "http" },
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.external_source, settings.external_source_ssl)
    }

    pub fn url_for(&self, version: IpVersion) -> String {
        format!("{}://{}.{}", self.scheme, version.host_prefix(), self.host)
    }
}

#[async_trait]
impl AddressSource for ExternalSource {
    async fn address(&self, version: IpVersion) -> Result<String> {
        let url = self.url_for(version);
        tracing::debug!("Fetching external {} address from {}", version, url);
        fetch_address(&self.client, &url).await
    }
}

/// GET `url` and return the body with surrounding whitespace removed.
pub async fn fetch_address(client: &Client, url: &str) -> Result<String> {
    let lookup_error = |source| Error::AddressLookup {
        url: url.to_string(),
        source,
    };

    let body = client
        .get(url)
        .send()
        .await
        .map_err(lookup_error)?
        .error_for_status()
        .map_err(lookup_error)?
        .text()
        .await
        .map_err(lookup_error)?;

    Ok(body.trim().to_string())
}
