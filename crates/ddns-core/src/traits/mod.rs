//! Core traits for the DDNS updater
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Determine the host's public IP address
//! - [`DnsProvider`]: Submit record changes via provider APIs

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::{IpSource, PublicAddress};
pub use dns_provider::{
    ChangeAction, ChangeRequest, ChangeResult, ChangeStatus, DnsProvider, normalize_record_name,
};
