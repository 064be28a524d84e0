// # ddns-core
//
// Core library for the single-shot DDNS updater.
//
// ## Architecture Overview
//
// One run discovers the current public address and repoints one DNS
// record at it:
// - **IpSource**: Trait for discovering the current address
// - **DnsProvider**: Trait for pushing a record update via a provider API
// - **DnsRecordUpdate**: The immutable payload built from the address
// - **DnsUpdater**: Orchestrates IP lookup → payload → update, once
// - **UpdaterConfig**: Environment-sourced configuration, loaded once
//
// ## Design Principles
//
// 1. **Single-shot**: No loop, no retry, no state; an external scheduler
//    supplies the cadence
// 2. **Explicit results**: Every step returns `Result`, classified by
//    `ErrorKind` (configuration, network, application)
// 3. **Config gate**: Configuration is validated before any network I/O
// 4. **Library-First**: The binary is a thin wrapper around this crate

pub mod traits;
pub mod updater;
pub mod record;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider, ProviderResponse, trim_response};
pub use updater::{DnsUpdater, UpdateReport, run_once};
pub use record::{DnsRecordUpdate, RecordType};
pub use config::{
    Credentials, IpSourceConfig, ProviderConfig, RecordConfig, ResponsePolicy, UpdateMode,
    UpdaterConfig,
};
pub use error::{Error, ErrorKind, Result};
