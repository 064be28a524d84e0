// # DNS Provider Trait
//
// Defines the interface for pushing a record update to a provider API.
//
// ## Implementations
//
// - Cloudflare: `ddns-provider-cloudflare` crate

use async_trait::async_trait;

use crate::record::DnsRecordUpdate;

/// Raw outcome of an update request
///
/// `body` is kept byte-for-byte so the binary can print it verbatim.
/// `application_error` is the provider's own reading of the body; it is
/// informational under the legacy response policy and fatal under the
/// strict one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as returned by the provider
    pub body: String,
    /// Failure reported inside the response, if any
    pub application_error: Option<String>,
}

impl ProviderResponse {
    /// True when the provider reported no application-level failure
    pub fn is_success(&self) -> bool {
        self.application_error.is_none()
    }
}

/// Trait for DNS provider implementations
///
/// # Single-shot
///
/// One call to [`DnsProvider::update_record`] sends exactly one request.
/// Providers do not retry, back off, or look the record up first: the
/// zone and record identifiers come from configuration and the update is
/// sent unconditionally.
///
/// # Credentials
///
/// The provider is the only component holding the API token, and the
/// update request is the only request that carries it.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Send the record update
    ///
    /// # Returns
    ///
    /// - `Ok(ProviderResponse)`: The provider answered (whatever it said)
    /// - `Err(Error)`: The request could not be completed
    async fn update_record(
        &self,
        update: &DnsRecordUpdate,
    ) -> Result<ProviderResponse, crate::Error>;

    /// Human-readable target of the update (for logging, never contains secrets)
    fn describe_target(&self) -> String;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
