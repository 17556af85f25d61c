use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::ip::IpVersion;

pub const ENV_KEY: &str = "CLOUDFLARE_DDNS_KEY";
pub const ENV_EMAIL: &str = "CLOUDFLARE_DDNS_EMAIL";
pub const ENV_DOMAIN: &str = "CLOUDFLARE_DDNS_DOMAIN";
pub const ENV_SUBDOMAIN: &str = "CLOUDFLARE_DDNS_SUBDOMAIN";

pub const DEFAULT_SUBDOMAIN: &str = "@";
pub const DEFAULT_EXTERNAL_SOURCE: &str = "ifcfg.org";
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub key: Option<String>,
    pub email: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub v4: Option<bool>,
    pub v6: Option<bool>,
    pub external_source: Option<String>,
    pub external_source_ssl: Option<bool>,
    pub skip_unchanged: bool,
    pub api_base: Option<String>,
    pub log_level: Option<String>,
}

/// Optional TOML settings file, the lowest priority layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    pub key: Option<String>,
    pub email: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub v4: Option<bool>,
    pub v6: Option<bool>,
    pub external_source: Option<String>,
    pub external_source_ssl: Option<bool>,
    pub skip_unchanged: Option<bool>,
    pub api_base: Option<String>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Fully resolved, immutable run configuration.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub email: String,
    pub domain: String,
    pub subdomain: String,
    pub update_v4: bool,
    pub update_v6: bool,
    pub external_source: String,
    pub external_source_ssl: bool,
    pub skip_unchanged: bool,
    pub api_base: String,
    pub log_level: String,
}

impl Settings {
    /// Merge flags, environment and file. For the four string settings a
    /// non-empty flag wins, then a non-empty environment variable, then the
    /// file, then the empty string.
    pub fn resolve<F>(cli: Overrides, file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |flag: Option<String>, var: &str, from_file: Option<String>| -> String {
            non_empty(flag)
                .or_else(|| non_empty(env(var)))
                .or_else(|| non_empty(from_file))
                .unwrap_or_default()
        };

        let mut subdomain = pick(cli.subdomain, ENV_SUBDOMAIN, file.subdomain);
        if subdomain.is_empty() {
            subdomain = DEFAULT_SUBDOMAIN.to_string();
        }

        Self {
            api_key: pick(cli.key, ENV_KEY, file.key),
            email: pick(cli.email, ENV_EMAIL, file.email),
            domain: pick(cli.domain, ENV_DOMAIN, file.domain),
            subdomain,
            update_v4: cli.v4.or(file.v4).unwrap_or(true),
            update_v6: cli.v6.or(file.v6).unwrap_or(true),
            external_source: non_empty(cli.external_source)
                .or_else(|| non_empty(file.external_source))
                .unwrap_or_else(|| DEFAULT_EXTERNAL_SOURCE.to_string()),
            external_source_ssl: cli
                .external_source_ssl
                .or(file.external_source_ssl)
                .unwrap_or(true),
            skip_unchanged: cli.skip_unchanged || file.skip_unchanged.unwrap_or(false),
            api_base: non_empty(cli.api_base)
                .or_else(|| non_empty(file.api_base))
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            log_level: non_empty(cli.log_level)
                .or_else(|| non_empty(file.log_level))
                .unwrap_or_else(default_log_level),
        }
    }

    /// Resolve against the real process environment.
    pub fn from_env(cli: Overrides, file: FileConfig) -> Self {
        Self::resolve(cli, file, |name| std::env::var(name).ok())
    }

    /// Record name to look up. `@` stands for the zone apex.
    pub fn record_name(&self) -> String {
        if self.subdomain == DEFAULT_SUBDOMAIN {
            self.domain.clone()
        } else {
            format!("{}.{}", self.subdomain, self.domain)
        }
    }

    pub fn protocol_enabled(&self, version: IpVersion) -> bool {
        match version {
            IpVersion::V4 => self.update_v4,
            IpVersion::V6 => self.update_v6,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Keeps the API key out of logs
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<REDACTED>")
            .field("email", &self.email)
            .field("domain", &self.domain)
            .field("subdomain", &self.subdomain)
            .field("update_v4", &self.update_v4)
            .field("update_v6", &self.update_v6)
            .field("external_source", &self.external_source)
            .field("external_source_ssl", &self.external_source_ssl)
            .field("skip_unchanged", &self.skip_unchanged)
            .field("api_base", &self.api_base)
            .field("log_level", &self.log_level)
            .finish()
    }
}
