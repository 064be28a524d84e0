//! Error types for the DDNS updater
//!
//! Every step of a run returns [`Result`]. Callers that need to react to a
//! failure category (a scheduler wrapper, the binary's exit code) use
//! [`Error::kind`] instead of matching on individual variants.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration (raised before any network I/O)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IP-echo service errors that are not transport faults
    #[error("IP source error: {0}")]
    IpSource(String),

    /// Transport faults: DNS resolution, connect, TLS, timeout, body read
    #[error("Network error: {0}")]
    Network(String),

    /// Input rejected by an opt-in check
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The provider answered, but reported a failure in its response
    #[error("Application error ({provider}): {message}")]
    Application {
        /// Provider name
        provider: String,
        /// Error message reported by the provider
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Coarse failure category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration was rejected; nothing was sent
    Configuration,
    /// A request could not be completed
    Network,
    /// A request completed but its content was unacceptable
    Application,
    /// Serialization or other internal failure
    Internal,
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an IP source error
    pub fn ip_source(msg: impl Into<String>) -> Self {
        Self::IpSource(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an application error reported by a provider
    pub fn application(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Application {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Configuration,
            Self::Network(_) | Self::IpSource(_) => ErrorKind::Network,
            Self::InvalidInput(_) | Self::Application { .. } => ErrorKind::Application,
            Self::Json(_) | Self::Other(_) => ErrorKind::Internal,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
