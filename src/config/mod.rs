mod settings;

pub use settings::{
    FileConfig, Overrides, Settings, DEFAULT_API_BASE, DEFAULT_EXTERNAL_SOURCE, DEFAULT_SUBDOMAIN,
    ENV_DOMAIN, ENV_EMAIL, ENV_KEY, ENV_SUBDOMAIN,
};
