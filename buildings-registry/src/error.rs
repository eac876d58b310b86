//! Error types for the buildings registry

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{BuildingId, ClientId};

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur in registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Client not found by id
    #[error("client not found: {id}")]
    ClientNotFound { id: ClientId },

    /// A building write referenced a client that does not exist
    #[error("client_id not found: {id}")]
    UnknownClientId { id: ClientId },

    /// Building not found by id
    #[error("building not found: {id}")]
    BuildingNotFound { id: BuildingId },

    /// Client write rejected (blank name, malformed custom field schema)
    #[error("invalid client: {}", .errors.join("; "))]
    InvalidClient { errors: Vec<String> },

    /// Building write rejected. Custom field violations are carried verbatim.
    #[error("invalid building: {}", .errors.join("; "))]
    InvalidBuilding { errors: Vec<String> },

    /// Seed data could not be applied
    #[error("seed error: {message}")]
    Seed { message: String },

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RegistryError {
    /// Create a seed error
    pub fn seed(message: impl Into<String>) -> Self {
        Self::Seed {
            message: message.into(),
        }
    }

    /// The individual rejection reasons for invalid writes, empty otherwise
    pub fn errors(&self) -> &[String] {
        match self {
            Self::InvalidClient { errors } | Self::InvalidBuilding { errors } => errors,
            _ => &[],
        }
    }

    /// Whether this is a missing client or building
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ClientNotFound { .. } | Self::BuildingNotFound { .. }
        )
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration file format not supported
    #[error("Unsupported configuration file format: {format}")]
    UnsupportedFormat { format: String },

    /// Configuration parsing failed
    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[from]
        source: figment::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
