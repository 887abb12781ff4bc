// # ddns-route53
//
// One-shot CLI that points a Route 53 record at this host's public IP.
//
// This binary is a THIN integration layer:
// 1. Parse arguments (flags or DDNS_* environment variables)
// 2. Initialize logging
// 3. Build the IP source, the Route 53 provider and the engine
// 4. Run the engine once and translate the outcome into an exit code
//
// All DDNS logic lives in ddns-core and the provider crates.
//
// ## Example
//
// ```bash
// ddns-route53 --zone-id Z0123456789ABC --record-name home.example.com
//
// # or, from a cron job
// export DDNS_ZONE_ID=Z0123456789ABC
// export DDNS_RECORD_NAME=home.example.com
// export DDNS_PROFILE=home-lab
// ddns-route53
// ```

mod cli;

use anyhow::Result;
use clap::Parser;
use ddns_core::{DdnsConfig, DdnsEngine};
use ddns_ip_http::HttpIpSource;
use ddns_provider_route53::Route53Provider;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use crate::cli::Args;

/// Exit codes
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// The change was accepted by Route 53
    Success = 0,
    /// Configuration, resolution, provider or unexpected error
    Failure = 1,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::Failure.into();
    }

    let config = args.to_config();
    if let Err(e) = config.validate() {
        error!("{}", e);
        return DdnsExitCode::Failure.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::Failure.into();
        }
    };

    match rt.block_on(run(config)) {
        Ok(()) => DdnsExitCode::Success.into(),
        Err(e) => {
            error!("Failed to update Route 53 record: {}", e);
            DdnsExitCode::Failure.into()
        }
    }
}

/// Resolve the public IP and upsert the record once
async fn run(config: DdnsConfig) -> Result<()> {
    let ip_source = HttpIpSource::from_config(&config.ip_source)?
        .with_version(config.record.record_type.ip_version());
    let provider = Route53Provider::from_profile(config.profile.clone());

    let engine = DdnsEngine::new(Box::new(ip_source), Box::new(provider), config)?;
    let result = engine.run_once().await?;

    info!(
        "Route 53 record update completed successfully (change {}, status {})",
        result.change_id, result.status
    );

    Ok(())
}
