//! DNS record update payload
//!
//! A [`DnsRecordUpdate`] is built once per run from the discovered address
//! and serialized into the PATCH body. Field order is part of the wire
//! format: `type`, `name`, `content`, `ttl`, `proxied`.

use serde::Serialize;

use crate::config::RecordConfig;
use crate::error::Result;

/// DNS record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordType {
    /// A record (IPv4)
    A,
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
        }
    }
}

/// Immutable record update sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsRecordUpdate {
    #[serde(rename = "type")]
    record_type: RecordType,
    name: String,
    content: String,
    ttl: u32,
    proxied: bool,
}

impl DnsRecordUpdate {
    /// Build an A record update for `content`
    ///
    /// `content` is embedded verbatim. Whether it is a well-formed address
    /// is the IP source's concern, not this type's.
    pub fn new(record: &RecordConfig, content: impl Into<String>) -> Self {
        Self {
            record_type: RecordType::A,
            name: record.name.clone(),
            content: content.into(),
            ttl: record.ttl,
            proxied: record.proxied,
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn proxied(&self) -> bool {
        self.proxied
    }

    /// Serialize to the compact JSON request body
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
