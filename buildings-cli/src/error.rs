//! Error type for CLI commands

use buildings_fields::FieldsError;
use buildings_registry::RegistryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// Values or specs given on the command line could not be parsed
    #[error("invalid input: {0}")]
    Input(String),

    /// Values were checked and rejected; the violations were already printed
    #[error("{count} violation(s)")]
    Rejected { count: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
