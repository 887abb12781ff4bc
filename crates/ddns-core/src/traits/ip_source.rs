// # IP Source Trait
//
// Defines the interface for determining the host's public IP address.
//
// ## Implementations
//
// - HTTP echo services: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//
//     let address = source.resolve().await?;
//     println!("Public IP: {} (via {})", address.ip(), address.source());
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;

use crate::config::IpVersion;

/// A resolved public address
///
/// Created once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicAddress {
    ip: IpAddr,
    source: String,
}

impl PublicAddress {
    /// Create a new public address
    ///
    /// # Parameters
    ///
    /// - `ip`: The resolved address
    /// - `source`: Where the address came from (e.g., the service URL)
    pub fn new(ip: IpAddr, source: impl Into<String>) -> Self {
        Self {
            ip,
            source: source.into(),
        }
    }

    /// The resolved address
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    /// Where the address came from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The address family
    pub fn version(&self) -> IpVersion {
        match self.ip {
            IpAddr::V4(_) => IpVersion::V4,
            IpAddr::V6(_) => IpVersion::V6,
        }
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

/// Trait for IP source implementations
///
/// A source answers a single question: what is this host's public address
/// right now. It does not retry beyond its own candidate list, does not
/// cache, and makes no decision about DNS updates.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Resolve the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(PublicAddress)`: The current public address
    /// - `Err(Error::Resolution)`: If no candidate produced a usable answer
    async fn resolve(&self) -> Result<PublicAddress, crate::Error>;

    /// Get the IP version this source is restricted to
    ///
    /// Returns `None` if any family is accepted.
    fn version(&self) -> Option<IpVersion> {
        None
    }
}
