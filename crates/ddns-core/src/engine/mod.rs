//! DDNS engine
//!
//! The DdnsEngine runs one update:
//! - Resolve the public address via IpSource
//! - Upsert the configured record via RecordUpdater / DnsProvider
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   PublicAddress   ┌──────────────┐   ChangeRequest   ┌─────────────┐
//! │  IpSource   │ ────────────────▶ │ DdnsEngine   │ ────────────────▶ │ DnsProvider │
//! └─────────────┘                   └──────────────┘                   └─────────────┘
//!                                           │
//!                                           ▼
//!                                     ChangeResult
//! ```
//!
//! There is no partial success: either the change is accepted by the
//! provider or the run fails. Nothing is mutated before the single upsert,
//! so nothing needs to be rolled back.

use crate::config::DdnsConfig;
use crate::error::Result;
use crate::traits::{ChangeResult, DnsProvider, IpSource};
use crate::updater::RecordUpdater;
use tracing::{Instrument, debug, error, info, info_span};

/// Core DDNS engine
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`]
/// 2. Call [`DdnsEngine::run_once()`]
/// 3. Drop
pub struct DdnsEngine {
    /// IP source for the current public address
    ip_source: Box<dyn IpSource>,

    /// Updater wrapping the DNS provider
    updater: RecordUpdater,

    /// Validated configuration
    config: DdnsConfig,
}

impl DdnsEngine {
    /// Create a new DDNS engine
    ///
    /// # Parameters
    ///
    /// - `ip_source`: IP source implementation
    /// - `provider`: DNS provider implementation
    /// - `config`: DDNS configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: DdnsConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            updater: RecordUpdater::new(provider),
            config,
        })
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &DdnsConfig {
        &self.config
    }

    /// Resolve the public address and upsert the record once
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeResult)`: The change was accepted by the provider
    /// - `Err(Error)`: Resolution or submission failed
    pub async fn run_once(&self) -> Result<ChangeResult> {
        let record = &self.config.record;
        let span = info_span!(
            "ddns_update",
            zone_id = %record.zone_id,
            record = %record.name,
            provider = self.updater.provider_name(),
        );

        self.resolve_and_upsert().instrument(span).await
    }

    async fn resolve_and_upsert(&self) -> Result<ChangeResult> {
        let record = &self.config.record;

        debug!("Resolving public IP address");
        let address = self.ip_source.resolve().await.inspect_err(|e| {
            error!("{}", e);
        })?;
        info!("Successfully retrieved public IP: {}", address);

        let result = self.updater.upsert_record(record, &address).await?;
        info!("{} record update completed successfully", record.record_type);
        Ok(result)
    }
}
