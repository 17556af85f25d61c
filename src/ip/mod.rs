mod external;

pub use external::{fetch_address, ExternalSource};

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Host prefix used by the echo service.
    pub fn host_prefix(&self) -> &'static str {
        match self {
            IpVersion::V4 => "v4",
            IpVersion::V6 => "v6",
        }
    }

    /// DNS record type carrying an address of this version.
    pub fn record_type(&self) -> &'static str {
        match self {
            IpVersion::V4 => "A",
            IpVersion::V6 => "AAAA",
        }
    }

    pub fn from_record_type(record_type: &str) -> Option<Self> {
        match record_type {
            "A" => Some(IpVersion::V4),
            "AAAA" => Some(IpVersion::V6),
            _ => None,
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpVersion::V4 => write!(f, "IPv4"),
            IpVersion::V6 => write!(f, "IPv6"),
        }
    }
}

#[async_trait]
pub trait AddressSource: Send + Sync {
    /// Current external address for the given protocol version
    async fn address(&self, version: IpVersion) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_mapping() {
        assert_eq!(IpVersion::V4.record_type(), "A");
        assert_eq!(IpVersion::V6.record_type(), "AAAA");
        assert_eq!(IpVersion::from_record_type("A"), Some(IpVersion::V4));
        assert_eq!(IpVersion::from_record_type("AAAA"), Some(IpVersion::V6));
        assert_eq!(IpVersion::from_record_type("CNAME"), None);
        assert_eq!(IpVersion::from_record_type("a"), None);
    }
}
