//! Layered error definitions
//!
//! Categorized by source: config / registry. Per-platform call failures are
//! never errors at this level; they are folded into `Outcome::Failure`.

use thiserror::Error;

use crate::PlatformId;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Registry Errors =====
    /// A platform id was registered twice
    #[error("duplicate platform id: {id}")]
    DuplicatePlatform { id: PlatformId },

    /// A platform id was referenced but never registered
    #[error("unknown platform id: {id}")]
    UnknownPlatform { id: PlatformId },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create duplicate platform error
    pub fn duplicate_platform(id: impl Into<PlatformId>) -> Self {
        Self::DuplicatePlatform { id: id.into() }
    }

    /// Create unknown platform error
    pub fn unknown_platform(id: impl Into<PlatformId>) -> Self {
        Self::UnknownPlatform { id: id.into() }
    }
}
