use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure talking to the Cloudflare API
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to get external address from {url}: {source}")]
    AddressLookup {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Cloudflare answered with `success: false`
    #[error("{code}: {message}")]
    Api { code: i64, message: String },

    #[error("Cloudflare reported failure without any error details")]
    UnknownApiError,

    #[error("No active zone found for domain: {0}")]
    ZoneNotFound(String),

    #[error("Failed to parse Cloudflare response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to load config file {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = Error::Api {
            code: 1003,
            message: "Invalid zone".to_string(),
        };
        assert_eq!(err.to_string(), "1003: Invalid zone");
    }

    #[test]
    fn test_zone_not_found_display() {
        let err = Error::ZoneNotFound("example.com".to_string());
        assert!(err.to_string().contains("example.com"));
    }
}
