//! Command-line interface
//!
//! Every flag can also come from a `DDNS_*` environment variable, which is
//! convenient for cron jobs and systemd units.

use clap::Parser;
use ddns_core::config::{
    DEFAULT_IP_TIMEOUT_SECS, DEFAULT_TTL, DdnsConfig, IpSourceConfig, RecordConfig, RecordType,
};

/// Update an AWS Route 53 record with this host's current public IP
#[derive(Debug, Parser)]
#[command(name = "ddns-route53", version, about)]
pub struct Args {
    /// AWS Route 53 hosted zone ID
    #[arg(long, env = "DDNS_ZONE_ID")]
    pub zone_id: String,

    /// DNS record name to update
    #[arg(long, env = "DDNS_RECORD_NAME")]
    pub record_name: String,

    /// TTL in seconds
    #[arg(long, env = "DDNS_TTL", default_value_t = DEFAULT_TTL)]
    pub ttl: u32,

    /// Record type (only A is supported)
    #[arg(long, env = "DDNS_RECORD_TYPE", default_value = "A", value_parser = parse_record_type)]
    pub record_type: RecordType,

    /// AWS profile name (default credential chain when omitted)
    #[arg(long, env = "DDNS_PROFILE")]
    pub profile: Option<String>,

    /// Public IP service to query, in priority order (repeatable; replaces the defaults)
    #[arg(
        long = "ip-service",
        value_name = "URL",
        env = "DDNS_IP_SERVICES",
        value_delimiter = ','
    )]
    pub ip_services: Vec<String>,

    /// Timeout for each public IP service, in seconds
    #[arg(long, env = "DDNS_IP_TIMEOUT_SECS", default_value_t = DEFAULT_IP_TIMEOUT_SECS)]
    pub ip_timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_record_type(value: &str) -> Result<RecordType, String> {
    value.parse().map_err(|e: ddns_core::Error| e.to_string())
}

impl Args {
    /// Build the run configuration from the parsed arguments
    pub fn to_config(&self) -> DdnsConfig {
        let mut ip_source = IpSourceConfig {
            timeout_secs: self.ip_timeout_secs,
            ..IpSourceConfig::default()
        };
        if !self.ip_services.is_empty() {
            ip_source.services = self.ip_services.clone();
        }

        DdnsConfig {
            ip_source,
            record: RecordConfig::new(&self.zone_id, &self.record_name)
                .with_ttl(self.ttl)
                .with_record_type(self.record_type),
            profile: self.profile.clone(),
        }
    }
}
