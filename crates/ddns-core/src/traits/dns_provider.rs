// # DNS Provider Trait
//
// Defines the interface for submitting record changes to a managed DNS API.
//
// ## Implementations
//
// - Route 53: `ddns-provider-route53` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::DnsProvider;
// use ddns_core::traits::ChangeRequest;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let request = ChangeRequest::upsert("Z123", "home.example.com", RecordType::A, 300, &address)?;
//     let result = provider.submit(&request).await?;
//     println!("{} {}", result.change_id, result.status);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::config::RecordType;
use crate::traits::PublicAddress;

/// Change action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record, or replace it if it exists
    Upsert,
}

/// A single record change, ready for submission
///
/// Built through [`ChangeRequest::upsert`] so the record name is always
/// fully qualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRequest {
    zone_id: String,
    action: ChangeAction,
    record_name: String,
    record_type: RecordType,
    ttl: u32,
    value: String,
}

impl ChangeRequest {
    /// Build an UPSERT change for an address record
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the address family does not match
    /// the record type.
    pub fn upsert(
        zone_id: impl Into<String>,
        record_name: &str,
        record_type: RecordType,
        ttl: u32,
        address: &PublicAddress,
    ) -> Result<Self, crate::Error> {
        if !record_type.ip_version().matches(&address.ip()) {
            return Err(crate::Error::invalid_input(format!(
                "{} record cannot hold address {}",
                record_type, address
            )));
        }

        Ok(Self {
            zone_id: zone_id.into(),
            action: ChangeAction::Upsert,
            record_name: normalize_record_name(record_name),
            record_type,
            ttl,
            value: address.ip().to_string(),
        })
    }

    /// Hosted zone the change is scoped to
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    /// Change action
    pub fn action(&self) -> ChangeAction {
        self.action
    }

    /// Fully qualified record name (always ends with `.`)
    pub fn record_name(&self) -> &str {
        &self.record_name
    }

    /// Record type
    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Time-to-live in seconds
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Record value (the address text)
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Append the zone-root `.` to a record name unless it is already there
pub fn normalize_record_name(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Propagation status reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatus {
    /// Accepted, not yet propagated
    Pending,
    /// Propagated to all authoritative servers
    InSync,
    /// Any status this crate does not know about
    Unknown(String),
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Pending => f.write_str("PENDING"),
            ChangeStatus::InSync => f.write_str("INSYNC"),
            ChangeStatus::Unknown(status) => f.write_str(status),
        }
    }
}

/// Result of a successful submission
///
/// Success means the provider accepted the change for processing, not that
/// it has propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeResult {
    /// Provider-assigned change identifier
    pub change_id: String,
    /// Status at submission time
    pub status: ChangeStatus,
    /// When the provider recorded the submission, if reported
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Trait for DNS provider implementations
///
/// # Contract
///
/// - One API call per [`submit`](DnsProvider::submit); no retries, no
///   polling for propagation.
/// - UPSERT semantics: the record may or may not exist beforehand, and
///   submitting the same value twice is not an error.
/// - Rejections reported by the provider map to `Error::Provider`; every
///   other failure maps to `Error::Unexpected`.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Submit a change request
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeResult)`: The provider accepted the change
    /// - `Err(Error)`: If the submission failed
    async fn submit(&self, request: &ChangeRequest) -> Result<ChangeResult, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
