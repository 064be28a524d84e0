//! Single-shot DNS updater
//!
//! The DnsUpdater performs one run:
//! - Discovers the current address via IpSource
//! - Builds the DnsRecordUpdate payload
//! - Sends it through DnsProvider (skipped in dry-run mode)
//! - Applies the response policy to the provider's answer
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐   address   ┌──────────────┐   payload   ┌─────────────┐
//! │  IpSource   │────────────▶│  DnsUpdater  │────────────▶│ DnsProvider │
//! └─────────────┘             └──────────────┘             └─────────────┘
//!                                     │
//!                                     ▼
//!                               UpdateReport
//! ```
//!
//! The two calls are awaited strictly in sequence. Nothing is retried; the
//! scheduler that launches the binary decides when to run again.

use crate::config::{RecordConfig, ResponsePolicy, UpdateMode, UpdaterConfig};
use crate::error::{Error, Result};
use crate::record::DnsRecordUpdate;
use crate::traits::{DnsProvider, IpSource, ProviderResponse};
use tracing::{debug, info, warn};

/// Outcome of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// Address reported by the IP source
    pub ip: String,

    /// Serialized request body (sent, or that would have been sent)
    pub request_body: String,

    /// Provider answer; `None` in dry-run mode
    pub response: Option<ProviderResponse>,
}

/// Single-shot DNS updater
///
/// ## Lifecycle
///
/// 1. Load an [`UpdaterConfig`]
/// 2. Create with [`DnsUpdater::new()`] (rejects bad configuration)
/// 3. Call [`DnsUpdater::run()`] once
/// 4. Drop
pub struct DnsUpdater {
    /// IP source for discovering the address
    ip_source: Box<dyn IpSource>,

    /// DNS provider for sending the update
    provider: Box<dyn DnsProvider>,

    /// Record template
    record: RecordConfig,

    /// Live or dry-run
    mode: UpdateMode,

    /// Legacy or strict handling of provider-reported failures
    response_policy: ResponsePolicy,
}

impl DnsUpdater {
    /// Create a new updater
    ///
    /// The configuration is validated here, before either component is
    /// touched, so a missing token can never reach the network.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: &UpdaterConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            provider,
            record: config.record.clone(),
            mode: config.mode,
            response_policy: config.response_policy,
        })
    }

    /// Run the update once and apply the response policy
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateReport)`: The run completed under the configured policy
    /// - `Err(Error)`: A step failed; later steps were not attempted
    pub async fn run(&self) -> Result<UpdateReport> {
        let report = self.execute().await?;
        self.enforce_policy(&report)?;
        Ok(report)
    }

    /// Run the update once without judging the provider's answer
    ///
    /// Callers that must show the response body before failing (the
    /// binary prints it in every mode) call this, then
    /// [`DnsUpdater::enforce_policy`].
    pub async fn execute(&self) -> Result<UpdateReport> {
        // Step 1: Discover the address
        let ip = self.ip_source.current().await?;
        info!("Current IP from {}: {}", self.ip_source.source_name(), ip);

        // Step 2: Build and serialize the payload
        let update = DnsRecordUpdate::new(&self.record, ip.clone());
        let request_body = update.to_json()?;
        debug!("Update payload: {}", request_body);

        // Step 3: Send it (or not)
        if self.mode == UpdateMode::DryRun {
            info!(
                "[DRY-RUN] Would send PATCH to {} with payload: {}",
                self.provider.describe_target(),
                request_body
            );
            return Ok(UpdateReport {
                ip,
                request_body,
                response: None,
            });
        }

        info!(
            "Updating {} DNS record {} -> {}",
            self.provider.provider_name(),
            update.name(),
            update.content()
        );
        let response = self.provider.update_record(&update).await?;
        debug!("Provider answered with status {}", response.status);

        Ok(UpdateReport {
            ip,
            request_body,
            response: Some(response),
        })
    }

    /// Apply the response policy to a finished run
    ///
    /// Legacy: a provider-reported failure is logged and the run still
    /// succeeds. Strict: it becomes [`Error::Application`].
    pub fn enforce_policy(&self, report: &UpdateReport) -> Result<()> {
        let Some(response) = &report.response else {
            return Ok(());
        };
        let Some(message) = &response.application_error else {
            info!("DNS record updated successfully");
            return Ok(());
        };

        match self.response_policy {
            ResponsePolicy::Legacy => {
                warn!(
                    "{} reported an error (status {}): {}",
                    self.provider.provider_name(),
                    response.status,
                    message
                );
                Ok(())
            }
            ResponsePolicy::Strict => Err(Error::application(
                self.provider.provider_name(),
                format!("status {}: {}", response.status, message),
            )),
        }
    }
}

/// Validate the configuration, then run once
///
/// Convenience for callers that already hold the components.
pub async fn run_once(
    ip_source: Box<dyn IpSource>,
    provider: Box<dyn DnsProvider>,
    config: &UpdaterConfig,
) -> Result<UpdateReport> {
    DnsUpdater::new(ip_source, provider, config)?.run().await
}
