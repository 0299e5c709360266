//! Error types for fabric-copy
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Compilation of a validly constructed model never fails; every variant
//! below is raised either while constructing a model, while selecting a
//! connector, or by the orchestration client.

use thiserror::Error;

/// The main error type for fabric-copy
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Field '{field}' cannot be combined with {variant} addressing")]
    ConflictingFields { variant: String, field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Unknown connector '{name}'")]
    UnknownConnector { name: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Capability Errors
    // ============================================================================
    #[error("Connector '{connector}' does not support being used as a {capability}")]
    UnsupportedCapability {
        connector: String,
        capability: String,
    },

    // ============================================================================
    // Orchestration API Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote API error {status_code}: {message}")]
    RemoteApi { status_code: u16, message: String },

    #[error("Operation accepted but not yet complete (poll {location})")]
    OperationPending { location: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a conflicting field error
    pub fn conflicting_field(variant: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ConflictingFields {
            variant: variant.into(),
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported capability error
    pub fn unsupported(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::UnsupportedCapability {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Create a remote API error
    pub fn remote_api(status_code: u16, message: impl Into<String>) -> Self {
        Self::RemoteApi {
            status_code,
            message: message.into(),
        }
    }

    /// Check if this error was caused by invalid caller input
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingConfigField { .. }
                | Error::ConflictingFields { .. }
                | Error::InvalidConfigValue { .. }
                | Error::UnknownConnector { .. }
                | Error::YamlParse(_)
                | Error::JsonParse(_)
        )
    }

    /// Check if this error reports a connector capability gap
    ///
    /// A capability gap is not a configuration mistake: the connector simply
    /// has no variant for the requested role.
    pub fn is_capability_gap(&self) -> bool {
        matches!(self, Error::UnsupportedCapability { .. })
    }
}

/// Result type alias for fabric-copy
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
