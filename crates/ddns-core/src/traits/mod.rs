//! Core traits for the DDNS updater
//!
//! - [`IpSource`]: Discover the current public address
//! - [`DnsProvider`]: Push a record update to a provider API

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::{IpSource, trim_response};
pub use dns_provider::{DnsProvider, ProviderResponse};
