use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cloudflare_ddns::{
    config::{FileConfig, Overrides, Settings},
    dns::create_provider,
    ip::ExternalSource,
    updater,
};

#[derive(Parser)]
#[command(name = "cloudflare-ddns")]
#[command(about = "Point Cloudflare A/AAAA records at your current external IP address")]
#[command(version)]
struct Cli {
    /// Your Cloudflare API key, overrides environment variable CLOUDFLARE_DDNS_KEY
    #[arg(long)]
    key: Option<String>,

    /// Your Cloudflare API email, overrides environment variable CLOUDFLARE_DDNS_EMAIL
    #[arg(long)]
    email: Option<String>,

    /// The domain to update records on, overrides environment variable CLOUDFLARE_DDNS_DOMAIN
    #[arg(long)]
    domain: Option<String>,

    /// The subdomain to update records on ("@" for the apex), overrides environment variable CLOUDFLARE_DDNS_SUBDOMAIN
    #[arg(long)]
    subdomain: Option<String>,

    /// Whether to set A records [default: true]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    v4: Option<bool>,

    /// Whether to set AAAA records [default: true]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    v6: Option<bool>,

    /// Service used to determine the external address, must have v4 and v6 subdomains [default: ifcfg.org]
    #[arg(long, value_name = "HOST")]
    external_source: Option<String>,

    /// Whether to use https for the external address service [default: true]
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    external_source_ssl: Option<bool>,

    /// Skip the update when a record already holds the current address
    #[arg(long)]
    skip_unchanged: bool,

    /// Read settings from a TOML file (lowest priority)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level filter, RUST_LOG takes precedence [default: info]
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[arg(long, hide = true)]
    api_base: Option<String>,
}

impl Cli {
    fn overrides(self) -> Overrides {
        Overrides {
            key: self.key,
            email: self.email,
            domain: self.domain,
            subdomain: self.subdomain,
            v4: self.v4,
            v6: self.v6,
            external_source: self.external_source,
            external_source_ssl: self.external_source_ssl,
            skip_unchanged: self.skip_unchanged,
            api_base: self.api_base,
            log_level: self.log_level,
        }
    }
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::from_env(cli.overrides(), file);

    init_logging(&settings.log_level);
    info!("Starting cloudflare-ddns v{}", env!("CARGO_PKG_VERSION"));

    let provider = create_provider(&settings)?;
    let source = ExternalSource::from_settings(&settings)?;

    // Update failures are reported, not turned into an exit status
    match updater::run(&settings, &provider, &source).await {
        Ok(summary) => {
            info!(
                "Successfully updated DNS records ({} updated, {} unchanged, {} skipped)",
                summary.updated, summary.unchanged, summary.skipped
            );
        }
        Err(e) => {
            error!("{}", e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["cloudflare-ddns"]);
        let overrides = cli.overrides();

        assert!(overrides.key.is_none());
        assert!(overrides.v4.is_none());
        assert!(overrides.v6.is_none());
        assert!(!overrides.skip_unchanged);
    }

    #[test]
    fn test_cli_bool_flags() {
        let cli = Cli::parse_from([
            "cloudflare-ddns",
            "--v4",
            "--v6=false",
            "--external-source-ssl",
            "false",
            "--domain",
            "example.com",
        ]);
        let overrides = cli.overrides();

        assert_eq!(overrides.v4, Some(true));
        assert_eq!(overrides.v6, Some(false));
        assert_eq!(overrides.external_source_ssl, Some(false));
        assert_eq!(overrides.domain.as_deref(), Some("example.com"));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
