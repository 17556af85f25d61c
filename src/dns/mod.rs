mod cloudflare;
mod provider;

pub use cloudflare::CloudflareProvider;
pub use provider::{
    ApiError, Credentials, DnsProvider, Record, RecordUpdate, ResponseEnvelope, Zone, RECORD_TTL,
};

use crate::config::Settings;
use crate::error::Result;

pub fn create_provider(settings: &Settings) -> Result<CloudflareProvider> {
    let credentials = Credentials {
        email: settings.email.clone(),
        api_key: settings.api_key.clone(),
    };

    CloudflareProvider::with_base_url(credentials, settings.api_base.as_str())
}
