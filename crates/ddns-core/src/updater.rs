//! Record updater
//!
//! Turns a resolved address into exactly one UPSERT change request and hands
//! it to a [`DnsProvider`]. Name normalization and address/type checks
//! happen here so every provider sees the same request shape.

use crate::config::{RecordConfig, RecordType};
use crate::error::{Error, Result};
use crate::traits::{ChangeRequest, ChangeResult, DnsProvider, PublicAddress};
use tracing::{debug, error, info};

/// Submits record changes through a DNS provider
pub struct RecordUpdater {
    provider: Box<dyn DnsProvider>,
}

impl RecordUpdater {
    /// Create a new updater backed by `provider`
    pub fn new(provider: Box<dyn DnsProvider>) -> Self {
        Self { provider }
    }

    /// Name of the backing provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Upsert an address record
    ///
    /// # Parameters
    ///
    /// - `zone_id`: Hosted zone to scope the change to
    /// - `record_name`: Record name, with or without the trailing `.`
    /// - `address`: Value to point the record at
    /// - `ttl`: Time-to-live in seconds
    /// - `record_type`: Record type (`A`)
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeResult)`: Change accepted for processing
    /// - `Err(Error::Provider)`: The provider rejected the change
    /// - `Err(Error::Unexpected)`: Any other failure reaching the provider
    pub async fn upsert(
        &self,
        zone_id: &str,
        record_name: &str,
        address: &PublicAddress,
        ttl: u32,
        record_type: RecordType,
    ) -> Result<ChangeResult> {
        let request = ChangeRequest::upsert(zone_id, record_name, record_type, ttl, address)?;

        debug!(
            "Submitting change to {}: {}",
            self.provider.provider_name(),
            serde_json::to_string(&request)?
        );

        match self.provider.submit(&request).await {
            Ok(result) => {
                info!(
                    "Successfully submitted change (ID: {}, Status: {})",
                    result.change_id, result.status
                );
                info!("Updated {} to {}", request.record_name(), request.value());
                Ok(result)
            }
            Err(e) => {
                match &e {
                    Error::Provider { .. } => error!("DNS provider rejected change: {}", e),
                    _ => error!("Failed to submit change: {}", e),
                }
                Err(e)
            }
        }
    }

    /// Upsert the record described by `record`
    pub async fn upsert_record(
        &self,
        record: &RecordConfig,
        address: &PublicAddress,
    ) -> Result<ChangeResult> {
        self.upsert(
            &record.zone_id,
            &record.name,
            address,
            record.ttl,
            record.record_type,
        )
        .await
    }
}
