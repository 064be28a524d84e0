//! Test doubles and common utilities for contract tests
//!
//! The doubles count their calls so tests can assert that a step was, or
//! was not, reached.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::record::DnsRecordUpdate;
use ddns_core::traits::{DnsProvider, IpSource, ProviderResponse, trim_response};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An IpSource that returns a canned body, trimmed like the HTTP source
pub struct StaticIpSource {
    /// Raw body the "service" returns
    body: String,
    /// Call counter for current()
    call_count: Arc<AtomicUsize>,
}

impl StaticIpSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times current() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new StaticIpSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            body: other.body.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let trimmed = trim_response(self.body.as_bytes());
        Ok(String::from_utf8_lossy(trimmed).into_owned())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// An IpSource whose lookup always fails at the transport level
pub struct UnreachableIpSource {
    call_count: Arc<AtomicUsize>,
}

impl UnreachableIpSource {
    pub fn new() -> Self {
        Self {
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for UnreachableIpSource {
    async fn current(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Err(Error::network("connection refused"))
    }

    fn source_name(&self) -> &'static str {
        "unreachable"
    }
}

/// A mock DnsProvider that records every payload it is asked to send
pub struct RecordingProvider {
    /// Call counter for update_record()
    update_call_count: Arc<AtomicUsize>,
    /// Serialized bodies from update calls
    sent_bodies: Arc<std::sync::Mutex<Vec<String>>>,
    /// Response returned from every call
    response: ProviderResponse,
}

impl RecordingProvider {
    /// A provider that answers like a successful Cloudflare PATCH
    pub fn succeeding() -> Self {
        Self::answering(ProviderResponse {
            status: 200,
            body: r#"{"success":true,"errors":[],"messages":[],"result":{}}"#.to_string(),
            application_error: None,
        })
    }

    /// A provider that answers like a rejected Cloudflare PATCH
    pub fn rejecting() -> Self {
        Self::answering(ProviderResponse {
            status: 400,
            body: r#"{"success":false,"errors":[{"code":7003,"message":"Could not route to /zones/bad"}]}"#
                .to_string(),
            application_error: Some("7003: Could not route to /zones/bad".to_string()),
        })
    }

    pub fn answering(response: ProviderResponse) -> Self {
        Self {
            update_call_count: Arc::new(AtomicUsize::new(0)),
            sent_bodies: Arc::new(std::sync::Mutex::new(Vec::new())),
            response,
        }
    }

    /// Get the number of times update_record() was called
    pub fn update_call_count(&self) -> usize {
        self.update_call_count.load(Ordering::SeqCst)
    }

    /// Get the bodies that were sent
    pub fn sent_bodies(&self) -> Vec<String> {
        self.sent_bodies.lock().unwrap().clone()
    }

    /// Create a new RecordingProvider that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            update_call_count: Arc::clone(&other.update_call_count),
            sent_bodies: Arc::clone(&other.sent_bodies),
            response: other.response.clone(),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for RecordingProvider {
    async fn update_record(&self, update: &DnsRecordUpdate) -> Result<ProviderResponse> {
        self.update_call_count.fetch_add(1, Ordering::SeqCst);
        self.sent_bodies.lock().unwrap().push(update.to_json()?);
        Ok(self.response.clone())
    }

    fn describe_target(&self) -> String {
        "mock://zones/test/dns_records/test".to_string()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create a valid UpdaterConfig for testing
pub fn test_config(token: &str) -> ddns_core::config::UpdaterConfig {
    ddns_core::config::UpdaterConfig::new(token)
}
