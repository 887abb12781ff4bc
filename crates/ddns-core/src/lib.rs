// # ddns-core
//
// Core library for the Route 53 dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the core functionality for a one-shot DNS update:
// - **IpSource**: Trait for determining the host's public IP address
// - **DnsProvider**: Trait for submitting record changes via provider APIs
// - **RecordUpdater**: Builds the single UPSERT change request for a run
// - **DdnsEngine**: Orchestrates the resolve → upsert flow
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from implementations
// 2. **Library-First**: All core functionality can be used as a library
// 3. **Idempotency**: UPSERT semantics make repeated runs converge

pub mod traits;
pub mod engine;
pub mod updater;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider, PublicAddress};
pub use engine::DdnsEngine;
pub use updater::RecordUpdater;
pub use config::{DdnsConfig, IpSourceConfig, RecordConfig, RecordType};
pub use error::{Error, Result};
