use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// TTL applied to every record we write, in seconds
pub const RECORD_TTL: u32 = 120;

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub zone_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

/// Wrapper around every Cloudflare API response
#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiError>,
    #[serde(default)]
    pub messages: Vec<serde_json::Value>,
    pub result: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    /// Turn a failed envelope into the first reported error.
    pub fn into_result(self) -> Result<Option<T>> {
        if self.success {
            return Ok(self.result);
        }

        match self.errors.into_iter().next() {
            Some(ApiError { code, message }) => Err(Error::Api { code, message }),
            None => Err(Error::UnknownApiError),
        }
    }
}

/// Body of a record replacement request
#[derive(Debug, Clone, Serialize)]
pub struct RecordUpdate<'a> {
    pub id: &'a str,
    pub content: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub name: &'a str,
    pub ttl: u32,
}

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Find the ID of the active zone named `domain`
    async fn resolve_zone(&self, domain: &str) -> Result<String>;

    /// List records in a zone whose name equals `name`
    async fn list_records(&self, zone_id: &str, name: &str) -> Result<Vec<Record>>;

    /// Replace a record's content, keeping its type and name
    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record_type: &str,
        name: &str,
        content: &str,
    ) -> Result<()>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
