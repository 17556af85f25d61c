use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::dns::DnsProvider;
use crate::error::Result;
use crate::ip::{AddressSource, IpVersion};

/// What a single update pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub updated: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

/// Log the target and current external addresses, then update every
/// matching record.
pub async fn run(
    settings: &Settings,
    provider: &dyn DnsProvider,
    source: &dyn AddressSource,
) -> Result<UpdateSummary> {
    info!(
        "Updating records for {} via {}",
        settings.record_name(),
        provider.provider_name()
    );
    info!("v4: {}", settings.update_v4);
    info!("v6: {}", settings.update_v6);

    for version in [IpVersion::V4, IpVersion::V6] {
        if settings.protocol_enabled(version) {
            let address = source.address(version).await?;
            info!("External {} address: {}", version, address);
        }
    }

    update_all(settings, provider, source).await
}

/// Resolve the zone, list records named after the configured target and
/// point each enabled A/AAAA record at a freshly fetched address. Stops at
/// the first failure.
pub async fn update_all(
    settings: &Settings,
    provider: &dyn DnsProvider,
    source: &dyn AddressSource,
) -> Result<UpdateSummary> {
    let zone_id = provider.resolve_zone(&settings.domain).await?;

    let name = settings.record_name();
    let records = provider.list_records(&zone_id, &name).await?;
    if records.is_empty() {
        warn!("No DNS records named {} in zone {}", name, zone_id);
    }

    let mut summary = UpdateSummary::default();

    for record in &records {
        let version = match IpVersion::from_record_type(&record.record_type) {
            Some(version) if settings.protocol_enabled(version) => version,
            _ => {
                debug!("Skipping {} record {}", record.record_type, record.name);
                summary.skipped += 1;
                continue;
            }
        };

        let address = source.address(version).await?;

        if settings.skip_unchanged && record.content == address {
            info!(
                "{} record {} already set to {}",
                record.record_type, record.name, address
            );
            summary.unchanged += 1;
            continue;
        }

        info!(
            "Updating {} record {} from {} to {}",
            record.record_type, record.name, record.content, address
        );

        provider
            .update_record(
                &zone_id,
                &record.id,
                &record.record_type,
                &record.name,
                &address,
            )
            .await?;

        summary.updated += 1;
    }

    Ok(summary)
}
