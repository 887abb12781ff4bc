//! Configuration types for the DDNS updater
//!
//! This module defines the configuration structures shared by the resolver,
//! the record updater and the binary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default public IP services, in priority order
pub const DEFAULT_IP_SERVICES: &[&str] = &[
    "https://api.ipify.org",
    "https://ifconfig.me/ip",
    "https://icanhazip.com",
    "https://ipinfo.io/ip",
];

/// Default per-service request timeout (seconds)
pub const DEFAULT_IP_TIMEOUT_SECS: u64 = 5;

/// Default record TTL (seconds)
pub const DEFAULT_TTL: u32 = 300;

/// Largest TTL Route 53 accepts
pub const MAX_TTL: u32 = i32::MAX as u32;

/// Main DDNS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DdnsConfig {
    /// Public IP resolution settings
    #[serde(default)]
    pub ip_source: IpSourceConfig,

    /// The record to upsert
    pub record: RecordConfig,

    /// Named credential profile (default chain when absent)
    #[serde(default)]
    pub profile: Option<String>,
}

impl DdnsConfig {
    /// Create a configuration for a record with default resolver settings
    pub fn new(record: RecordConfig) -> Self {
        Self {
            ip_source: IpSourceConfig::default(),
            record,
            profile: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.ip_source.validate()?;
        self.record.validate()?;

        if let Some(ref profile) = self.profile
            && profile.trim().is_empty()
        {
            return Err(crate::Error::config("Credential profile name cannot be empty"));
        }

        Ok(())
    }
}

/// Public IP resolution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpSourceConfig {
    /// Services to query, highest priority first
    #[serde(default = "default_services")]
    pub services: Vec<String>,

    /// Timeout for each request (in seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl IpSourceConfig {
    /// Validate the IP source configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.services.is_empty() {
            return Err(crate::Error::config("At least one IP service is required"));
        }

        for url in &self.services {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err(crate::Error::config(format!(
                    "IP service must use HTTP or HTTPS scheme. Got: {}",
                    url
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(crate::Error::config("IP service timeout must be > 0"));
        }

        Ok(())
    }
}

impl Default for IpSourceConfig {
    fn default() -> Self {
        Self {
            services: default_services(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_services() -> Vec<String> {
    DEFAULT_IP_SERVICES.iter().map(|s| s.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_IP_TIMEOUT_SECS
}

/// DNS record configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Hosted zone identifier (e.g., "Z0123456789ABC")
    pub zone_id: String,

    /// DNS record name (e.g., "home.example.com")
    pub name: String,

    /// Record type
    #[serde(default)]
    pub record_type: RecordType,

    /// Time-to-live in seconds
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl RecordConfig {
    /// Create a new record configuration with default type and TTL
    pub fn new(zone_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            name: name.into(),
            record_type: RecordType::default(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the record type
    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    /// Validate the record configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.zone_id.is_empty() {
            return Err(crate::Error::config("Hosted zone ID cannot be empty"));
        }

        if self.zone_id.chars().any(char::is_whitespace) {
            return Err(crate::Error::config(format!(
                "Hosted zone ID contains whitespace: '{}'",
                self.zone_id
            )));
        }

        if self.ttl > MAX_TTL {
            return Err(crate::Error::config(format!(
                "TTL must be between 0 and {} seconds. Got: {}",
                MAX_TTL, self.ttl
            )));
        }

        validate_domain_name(&self.name)
    }
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

/// Validate that a string is a usable record name
///
/// Basic RFC 1035 checks. A single trailing `.` and a leading `*` wildcard
/// label are accepted.
pub fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    let domain = domain.strip_suffix('.').unwrap_or(domain);

    if domain.is_empty() {
        return Err(crate::Error::config("Record name cannot be empty"));
    }

    // RFC 1035: 253 chars max
    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Record name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for (index, label) in domain.split('.').enumerate() {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Record name has empty label: '{}'",
                domain
            )));
        }

        if index == 0 && label == "*" {
            continue;
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Record label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(crate::Error::config(format!(
                "Record label contains invalid characters. Label: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Record label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}

/// DNS record type
///
/// Only address records are managed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    /// A record (IPv4)
    #[default]
    A,
}

impl RecordType {
    /// The wire name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
        }
    }

    /// The address family this record type holds
    pub fn ip_version(&self) -> IpVersion {
        match self {
            RecordType::A => IpVersion::V4,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(RecordType::A),
            other => Err(crate::Error::config(format!(
                "Record type '{}' is not supported. Supported types: A",
                other
            ))),
        }
    }
}

/// IP address family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpVersion {
    /// IPv4 only
    V4,
    /// IPv6 only
    V6,
}

impl IpVersion {
    /// Check whether an address belongs to this family
    pub fn matches(&self, ip: &std::net::IpAddr) -> bool {
        match self {
            IpVersion::V4 => ip.is_ipv4(),
            IpVersion::V6 => ip.is_ipv6(),
        }
    }
}
