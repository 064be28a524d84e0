//! Configuration types for the DDNS updater
//!
//! Configuration is read once from environment variables at startup and is
//! immutable for the rest of the run. Only `CF_API_KEY` is required; every
//! other setting has a default matching the stock deployment.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable holding the Cloudflare API token
pub const API_TOKEN_VAR: &str = "CF_API_KEY";

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default IP-echo service
pub const DEFAULT_IP_SOURCE_URL: &str = "https://icanhazip.com/";

/// Zone updated by the stock deployment
pub const DEFAULT_ZONE_ID: &str = "d6adb6059ddec321ca4077f1389c50e3";

/// Record updated by the stock deployment
pub const DEFAULT_RECORD_ID: &str = "c067a40a66781f83ed8be14d5902234f";

const DEFAULT_RECORD_NAME: &str = "check";
const DEFAULT_RECORD_TTL: u32 = 60;

/// Bearer token for the provider API
///
/// The Debug implementation never shows the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header only
    /// ⚠️ NEVER log this value
    pub fn token(&self) -> &str {
        &self.0
    }

    /// True when the token is empty
    ///
    /// A whitespace-only token is not empty; the API decides whether it is
    /// valid.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every byte may appear in an HTTP header value
    ///
    /// Control characters other than tab, and DEL, are not allowed.
    pub fn is_header_safe(&self) -> bool {
        self.0
            .bytes()
            .all(|b| (b >= 0x20 || b == b'\t') && b != 0x7f)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(<REDACTED>)")
    }
}

/// Main updater configuration
#[derive(Debug, Clone)]
pub struct UpdaterConfig {
    /// DNS provider configuration
    pub provider: ProviderConfig,

    /// IP source configuration
    pub ip_source: IpSourceConfig,

    /// Record written on every run
    pub record: RecordConfig,

    /// Live or dry-run
    pub mode: UpdateMode,

    /// How API-level errors in the update response are treated
    pub response_policy: ResponsePolicy,

    /// Optional HTTP timeout applied to both clients
    pub http_timeout_secs: Option<u64>,

    /// Log level for the binary's subscriber
    pub log_level: String,
}

impl UpdaterConfig {
    /// Create a configuration with defaults around the given token
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            provider: ProviderConfig::new(api_token),
            ip_source: IpSourceConfig::default(),
            record: RecordConfig::default(),
            mode: UpdateMode::Live,
            response_policy: ResponsePolicy::Legacy,
            http_timeout_secs: None,
            log_level: "info".to_string(),
        }
    }

    /// Load and validate configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load and validate configuration through an arbitrary variable lookup
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_token = lookup(API_TOKEN_VAR).unwrap_or_default();
        let mut config = Self::new(api_token);

        if let Some(zone_id) = lookup("DDNS_ZONE_ID") {
            config.provider.zone_id = zone_id;
        }
        if let Some(record_id) = lookup("DDNS_RECORD_ID") {
            config.provider.record_id = record_id;
        }
        if let Some(api_base) = lookup("DDNS_API_BASE") {
            config.provider.api_base = api_base;
        }
        if let Some(url) = lookup("DDNS_IP_SOURCE_URL") {
            config.ip_source.url = url;
        }
        if let Some(value) = lookup("DDNS_VALIDATE_IPV4") {
            config.ip_source.validate_ipv4 = parse_bool("DDNS_VALIDATE_IPV4", &value)?;
        }
        if let Some(name) = lookup("DDNS_RECORD_NAME") {
            config.record.name = name;
        }
        if let Some(value) = lookup("DDNS_RECORD_TTL") {
            config.record.ttl = value.trim().parse().map_err(|_| {
                Error::config(format!(
                    "DDNS_RECORD_TTL must be a number of seconds. Got: {}",
                    value
                ))
            })?;
        }
        if let Some(value) = lookup("DDNS_RECORD_PROXIED") {
            config.record.proxied = parse_bool("DDNS_RECORD_PROXIED", &value)?;
        }
        if let Some(value) = lookup("DDNS_STRICT") {
            config.response_policy = if parse_bool("DDNS_STRICT", &value)? {
                ResponsePolicy::Strict
            } else {
                ResponsePolicy::Legacy
            };
        }
        if let Some(value) = lookup("DDNS_MODE") {
            config.mode = value.parse()?;
        }
        if let Some(value) = lookup("DDNS_HTTP_TIMEOUT_SECS") {
            let secs = value.trim().parse().map_err(|_| {
                Error::config(format!(
                    "DDNS_HTTP_TIMEOUT_SECS must be a number of seconds. Got: {}",
                    value
                ))
            })?;
            config.http_timeout_secs = Some(secs);
        }
        if let Some(level) = lookup("DDNS_LOG_LEVEL") {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// A failure here means nothing has been sent yet.
    pub fn validate(&self) -> Result<()> {
        self.provider.validate()?;
        self.ip_source.validate()?;
        self.record.validate()?;

        if let Some(secs) = self.http_timeout_secs
            && !(1..=300).contains(&secs)
        {
            return Err(Error::config(format!(
                "DDNS_HTTP_TIMEOUT_SECS must be between 1 and 300 seconds. Got: {}",
                secs
            )));
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(Error::config(format!(
                "DDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ))),
        }
    }

    /// HTTP timeout, if one was configured
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }
}

/// Cloudflare provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API token
    pub api_token: Credentials,
    /// Zone identifier, passed through verbatim
    pub zone_id: String,
    /// Record identifier, passed through verbatim
    pub record_id: String,
    /// API base URL without a trailing slash
    pub api_base: String,
}

impl ProviderConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: Credentials::new(api_token),
            zone_id: DEFAULT_ZONE_ID.to_string(),
            record_id: DEFAULT_RECORD_ID.to_string(),
            api_base: CLOUDFLARE_API_BASE.to_string(),
        }
    }

    /// Validate the provider configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_token.is_empty() {
            return Err(Error::config(format!(
                "{var} was not defined. Set it via: export {var}=your_token",
                var = API_TOKEN_VAR
            )));
        }
        if !self.api_token.is_header_safe() {
            return Err(Error::config(format!(
                "{} contains characters not allowed in an HTTP header",
                API_TOKEN_VAR
            )));
        }
        if self.zone_id.is_empty() {
            return Err(Error::config("DDNS_ZONE_ID cannot be empty"));
        }
        if self.record_id.is_empty() {
            return Err(Error::config("DDNS_RECORD_ID cannot be empty"));
        }
        validate_http_url("DDNS_API_BASE", &self.api_base)
    }
}

/// IP-echo source configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpSourceConfig {
    /// URL returning the caller's address as plain text
    pub url: String,
    /// Reject bodies that do not parse as an IPv4 address
    pub validate_ipv4: bool,
}

impl IpSourceConfig {
    /// Validate the IP source configuration
    pub fn validate(&self) -> Result<()> {
        validate_http_url("DDNS_IP_SOURCE_URL", &self.url)
    }
}

impl Default for IpSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_IP_SOURCE_URL.to_string(),
            validate_ipv4: false,
        }
    }
}

/// DNS record configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordConfig {
    /// DNS record name
    pub name: String,
    /// Time-to-live in seconds (1 means automatic)
    pub ttl: u32,
    /// Route traffic through the provider's edge
    pub proxied: bool,
}

impl RecordConfig {
    /// Create a new record configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ttl: DEFAULT_RECORD_TTL,
            proxied: false,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the proxied flag
    pub fn with_proxied(mut self, proxied: bool) -> Self {
        self.proxied = proxied;
        self
    }

    /// Validate the record configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("DDNS_RECORD_NAME cannot be empty"));
        }
        if self.ttl != 1 && !(60..=86400).contains(&self.ttl) {
            return Err(Error::config(format!(
                "DDNS_RECORD_TTL must be 1 (automatic) or between 60 and 86400. Got: {}",
                self.ttl
            )));
        }
        Ok(())
    }
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_NAME)
    }
}

/// Whether the update request is actually sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Send the PATCH
    Live,
    /// Discover the IP and build the payload, but skip the PATCH
    DryRun,
}

impl std::str::FromStr for UpdateMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(UpdateMode::Live),
            "dry-run" | "dry_run" | "dryrun" => Ok(UpdateMode::DryRun),
            _ => Err(Error::config(format!(
                "DDNS_MODE '{}' is not supported. Supported modes: live, dry-run",
                s
            ))),
        }
    }
}

/// Treatment of API-level errors in the update response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePolicy {
    /// Print the body and succeed whatever it says
    Legacy,
    /// Print the body, then fail if the provider reported an error
    Strict,
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::config(format!(
            "{} must be a boolean (true/false). Got: {}",
            var, value
        ))),
    }
}

fn validate_http_url(var: &str, url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(Error::config(format!("{} cannot be empty", var)));
    }
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(Error::config(format!(
            "{} must use HTTP or HTTPS scheme. Got: {}",
            var, url
        )));
    }
    Ok(())
}
