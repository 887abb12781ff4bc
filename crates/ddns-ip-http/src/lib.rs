// # HTTP IP Source
//
// This crate resolves the host's public IP address by asking external
// echo services (api.ipify.org, ifconfig.me, ...) which answer with the
// caller's address as plain text.
//
// ## Failover
//
// Services are tried strictly in priority order. The first one that answers
// HTTP 200 with a valid address of the wanted family wins and no further
// service is contacted. A failing service is never retried; the next one is
// tried instead. When the list is exhausted, `Error::Resolution` lists every
// service that was attempted.

use async_trait::async_trait;
use ddns_core::config::{IpSourceConfig, IpVersion};
use ddns_core::traits::{IpSource, PublicAddress};
use ddns_core::{Error, Result};

use std::net::IpAddr;
use std::time::Duration;

use tracing::{debug, warn};

/// Largest response body accepted from a service (an IPv6 address with
/// surrounding whitespace fits easily)
const MAX_BODY_BYTES: usize = 64;

/// Why a single service did not produce an address
#[derive(Debug, thiserror::Error)]
enum CandidateError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to read response: {0}")]
    Body(#[source] reqwest::Error),

    #[error("response body exceeds {MAX_BODY_BYTES} bytes")]
    TooLarge,

    #[error("invalid IP address: {0:?}")]
    Parse(String),

    #[error("expected {expected:?} address, got: {ip}")]
    WrongFamily { expected: IpVersion, ip: IpAddr },
}

/// HTTP-based public IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// Services to query, highest priority first
    services: Vec<String>,

    /// Address family to accept (None = any)
    version: Option<IpVersion>,

    /// HTTP client (carries the per-request timeout)
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `services`: URLs to query, highest priority first
    /// - `timeout`: Timeout applied to each request
    pub fn new(services: Vec<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Self::with_client(services, client)
    }

    /// Create an HTTP IP source around a preconfigured client
    ///
    /// The client's timeout applies to each service.
    pub fn with_client(services: Vec<String>, client: reqwest::Client) -> Result<Self> {
        if services.is_empty() {
            return Err(Error::config("At least one IP service is required"));
        }

        Ok(Self {
            services,
            version: None,
            client,
        })
    }

    /// Create an HTTP IP source from configuration
    pub fn from_config(config: &IpSourceConfig) -> Result<Self> {
        config.validate()?;
        Self::new(
            config.services.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Only accept addresses of the given family
    pub fn with_version(mut self, version: IpVersion) -> Self {
        self.version = Some(version);
        self
    }

    /// Services this source queries, in priority order
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Fetch the address from a single service
    async fn fetch_ip(&self, url: &str) -> std::result::Result<IpAddr, CandidateError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(CandidateError::Request)?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(CandidateError::Status(response.status()));
        }

        if let Some(length) = response.content_length()
            && length > MAX_BODY_BYTES as u64
        {
            return Err(CandidateError::TooLarge);
        }

        let mut body = Vec::with_capacity(MAX_BODY_BYTES);
        while let Some(chunk) = response.chunk().await.map_err(CandidateError::Body)? {
            if body.len() + chunk.len() > MAX_BODY_BYTES {
                return Err(CandidateError::TooLarge);
            }
            body.extend_from_slice(&chunk);
        }

        let ip_text = String::from_utf8_lossy(&body);
        let ip_text = ip_text.trim();

        let ip: IpAddr = ip_text
            .parse()
            .map_err(|_| CandidateError::Parse(ip_text.to_string()))?;

        if let Some(expected) = self.version
            && !expected.matches(&ip)
        {
            return Err(CandidateError::WrongFamily { expected, ip });
        }

        Ok(ip)
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn resolve(&self) -> Result<PublicAddress> {
        let mut attempted = Vec::with_capacity(self.services.len());

        for url in &self.services {
            attempted.push(url.clone());
            debug!("Querying public IP service {}", url);

            match self.fetch_ip(url).await {
                Ok(ip) => {
                    debug!("{} reported {}", url, ip);
                    return Ok(PublicAddress::new(ip, url.clone()));
                }
                Err(e) => {
                    warn!("Failed to get IP from {}: {}", url, e);
                }
            }
        }

        Err(Error::resolution(attempted))
    }

    fn version(&self) -> Option<IpVersion> {
        self.version
    }
}
