// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare DNS provider for the DDNS updater.
//
// ## Behavior
//
// - Sends exactly one `PATCH` per update, to a record addressed by the
//   configured zone and record identifiers (no lookup beforehand)
// - Returns the response body verbatim, whatever the status
// - Reads Cloudflare's `success` / `errors` envelope to report an
//   application-level failure, which the updater's response policy acts on
// - Transport failures become `Error::Network`
//
// ## Security Requirements
//
// - API token NEVER appears in logs or Debug output
// - API token is sent only on the update request
// - Construction fails if the token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - Patch DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

use async_trait::async_trait;
use ddns_core::config::{ProviderConfig, UpdaterConfig};
use ddns_core::record::DnsRecordUpdate;
use ddns_core::traits::{DnsProvider, ProviderResponse};
use ddns_core::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;

/// Cloudflare API response envelope
#[derive(Debug, Deserialize)]
struct CloudflareResponse {
    success: bool,
    #[serde(default)]
    errors: Vec<CloudflareError>,
}

#[derive(Debug, Deserialize)]
struct CloudflareError {
    code: i64,
    message: String,
}

/// Cloudflare DNS provider
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// Fully built record URL
    record_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("record_url", &self.record_url)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `config`: Token, zone ID, record ID and API base URL
    /// - `timeout`: Optional request timeout; `None` keeps the client default
    ///
    /// # Security
    ///
    /// The API token will NEVER be logged or displayed in error messages.
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        let record_url = format!(
            "{}/zones/{}/dns_records/{}",
            config.api_base.trim_end_matches('/'),
            config.zone_id,
            config.record_id
        );

        Ok(Self {
            api_token: config.api_token.token().to_string(),
            record_url,
            client,
        })
    }

    /// Create from the full updater configuration
    pub fn from_config(config: &UpdaterConfig) -> Result<Self> {
        Self::new(&config.provider, config.http_timeout())
    }

    /// Build the update request without sending it
    ///
    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// Authorization: Bearer <token>
    /// Content-Type: application/json
    ///
    /// {"type":"A","name":"check","content":"1.2.3.4","ttl":60,"proxied":false}
    /// ```
    pub fn build_request(&self, update: &DnsRecordUpdate) -> Result<reqwest::Request> {
        let body = update.to_json()?;

        self.client
            .patch(&self.record_url)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .build()
            .map_err(|e| Error::config(format!("Failed to build Cloudflare request: {}", e)))
    }
}

/// Read Cloudflare's envelope and describe the failure, if there is one
///
/// An unparseable body is always a failure: something other than the API
/// answered (proxies in front of it reply with HTML).
fn envelope_error(status: reqwest::StatusCode, body: &str) -> Option<String> {
    match serde_json::from_str::<CloudflareResponse>(body) {
        Ok(envelope) if envelope.success && status.is_success() => None,
        Ok(envelope) if envelope.errors.is_empty() => {
            Some(format!("request failed with status {}", status))
        }
        Ok(envelope) => Some(
            envelope
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.code, e.message))
                .collect::<Vec<_>>()
                .join("; "),
        ),
        Err(_) if status.is_success() => {
            Some("response is not a Cloudflare API envelope".to_string())
        }
        Err(_) => Some(format!("request failed with status {}", status)),
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// Send the record update
    ///
    /// This implementation:
    /// - Makes ONE HTTP request
    /// - Never retries, never backs off
    /// - Never logs the API token
    async fn update_record(&self, update: &DnsRecordUpdate) -> Result<ProviderResponse> {
        let request = self.build_request(update)?;
        tracing::debug!("PATCH {}", self.record_url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::network(format!("Cloudflare request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Response Status: {}", status);

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read Cloudflare response: {}", e)))?;

        let application_error = envelope_error(status, &body);
        if let Some(ref message) = application_error {
            tracing::debug!("Cloudflare reported: {}", message);
        }

        Ok(ProviderResponse {
            status: status.as_u16(),
            body,
            application_error,
        })
    }

    fn describe_target(&self) -> String {
        self.record_url.clone()
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}
