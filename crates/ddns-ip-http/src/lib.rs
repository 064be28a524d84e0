// # HTTP IP Source
//
// This crate provides the HTTP IP-echo source for the DDNS updater.
//
// ## Behavior
//
// One `GET` to the configured URL (default `https://icanhazip.com/`) per
// call. The body is read in full, surrounding ASCII whitespace (vertical
// tab included) is stripped and the rest is decoded as UTF-8. The result is passed through as-is
// unless IPv4 validation was explicitly enabled.
//
// A non-2xx status is logged but does not fail the lookup: the body is
// still what the service returned, and passing it through is the
// documented contract.
//
// ## Security
//
// This request never carries the provider API token.

use ddns_core::config::{IpSourceConfig, UpdaterConfig};
use ddns_core::traits::{IpSource, trim_response};
use ddns_core::{Error, Result};

use std::net::Ipv4Addr;
use std::time::Duration;

/// HTTP-based IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// URL to fetch the address from
    url: String,

    /// Reject bodies that are not an IPv4 address
    validate_ipv4: bool,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `config`: URL and validation switch
    /// - `timeout`: Optional request timeout; `None` keeps the client default
    pub fn new(config: &IpSourceConfig, timeout: Option<Duration>) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: config.url.clone(),
            validate_ipv4: config.validate_ipv4,
            client,
        })
    }

    /// Create from the full updater configuration
    pub fn from_config(config: &UpdaterConfig) -> Result<Self> {
        Self::new(&config.ip_source, config.http_timeout())
    }

    /// Build the lookup request without sending it
    pub fn build_request(&self) -> Result<reqwest::Request> {
        self.client
            .get(&self.url)
            .build()
            .map_err(|e| Error::config(format!("Invalid IP source URL {}: {}", self.url, e)))
    }
}

/// Strip surrounding ASCII whitespace and decode as UTF-8
fn decode_body(body: &[u8]) -> Result<String> {
    std::str::from_utf8(trim_response(body))
        .map(str::to_string)
        .map_err(|e| Error::ip_source(format!("Response is not valid UTF-8: {}", e)))
}

fn check_ipv4(text: &str) -> Result<()> {
    text.parse::<Ipv4Addr>()
        .map(|_| ())
        .map_err(|_| Error::invalid_input(format!("Expected IPv4, got: {:?}", text)))
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<String> {
        let request = self.build_request()?;
        tracing::debug!("GET {}", self.url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::network(format!("IP lookup request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("IP source {} answered with status {}", self.url, status);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::network(format!("Failed to read IP lookup response: {}", e)))?;

        let ip = decode_body(&body)?;

        if self.validate_ipv4 {
            check_ipv4(&ip)?;
        }

        Ok(ip)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
