// # ddns-update - single-shot DDNS updater
//
// Thin integration layer: all update logic lives in ddns-core.
//
// The binary is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging (stderr only; stdout carries the response body)
// 3. Building the IP source and provider
// 4. Running the updater once and printing the provider's response body
// 5. Mapping the outcome to an exit code
//
// It is meant to be launched by an external scheduler (cron, a systemd
// timer); the scheduler supplies the retry cadence.
//
// ## Configuration
//
// Required:
// - `CF_API_KEY`: Cloudflare API token
//
// Optional:
// - `DDNS_ZONE_ID`, `DDNS_RECORD_ID`: Record to update
// - `DDNS_RECORD_NAME`, `DDNS_RECORD_TTL`, `DDNS_RECORD_PROXIED`: Record content
// - `DDNS_IP_SOURCE_URL`: IP-echo URL (default https://icanhazip.com/)
// - `DDNS_VALIDATE_IPV4`: Reject echo bodies that are not IPv4
// - `DDNS_API_BASE`: Cloudflare API base URL
// - `DDNS_STRICT`: Fail when the API reports an error in its response
// - `DDNS_MODE`: "live" (default) or "dry-run"
// - `DDNS_HTTP_TIMEOUT_SECS`: Request timeout (unset: client default)
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export CF_API_KEY=your_token
// ddns-update
// ```

use anyhow::Result;
use ddns_core::{DnsUpdater, ErrorKind, UpdaterConfig};
use ddns_ip_http::HttpIpSource;
use ddns_provider_cloudflare::CloudflareProvider;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Update sent (under the legacy policy, whatever the API answered)
/// - 1: Configuration error, nothing was sent
/// - 2: Runtime error (network or internal)
/// - 3: The API reported an error (strict policy only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
    ApplicationError = 3,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl DdnsExitCode {
    /// Exit code for a failed run
    fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<ddns_core::Error>().map(ddns_core::Error::kind) {
            Some(ErrorKind::Configuration) => DdnsExitCode::ConfigError,
            Some(ErrorKind::Application) => DdnsExitCode::ApplicationError,
            Some(ErrorKind::Network) | Some(ErrorKind::Internal) | None => {
                DdnsExitCode::RuntimeError
            }
        }
    }
}

fn log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match UpdaterConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&config.log_level))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    // One task, two sequential requests: no worker threads needed
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run_update(&config).await {
            Ok(()) => DdnsExitCode::Success,
            Err(e) => {
                error!("Update failed: {}", e);
                DdnsExitCode::for_error(&e)
            }
        }
    });

    code.into()
}

/// Run the update once
async fn run_update(config: &UpdaterConfig) -> Result<()> {
    let ip_source = HttpIpSource::from_config(config)?;
    let provider = CloudflareProvider::from_config(config)?;

    let updater = DnsUpdater::new(Box::new(ip_source), Box::new(provider), config)?;

    info!("Starting DNS update");
    let report = updater.execute().await?;

    // The body is printed before the policy is applied, so strict mode
    // still shows what the API said
    if let Some(ref response) = report.response {
        println!("{}", response.body);
    }

    updater.enforce_policy(&report)?;
    Ok(())
}
