//! Registry configuration loaded with figment
//!
//! Sources are merged in precedence order (later sources override earlier
//! ones):
//! 1. Built-in defaults
//! 2. An optional configuration file (TOML, YAML or JSON by extension)
//! 3. Environment variables prefixed with `BUILDINGS_`, nested keys split on `__`
//!    (for example `BUILDINGS_LISTING__MAX_LIMIT=50`)

use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "BUILDINGS_";

/// Top-level registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub listing: ListingConfig,
}

/// Pagination settings for building listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Page size used when a request does not give one
    pub default_limit: u32,
    /// Largest page size a request may ask for
    pub max_limit: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            max_limit: 100,
        }
    }
}

impl RegistryConfig {
    /// Load configuration from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            figment = figment.merge(file_provider(path)?);
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        debug!(
            default_limit = config.listing.default_limit,
            max_limit = config.listing.max_limit,
            "loaded registry configuration"
        );
        Ok(config)
    }

    /// Check the loaded values for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let listing = &self.listing;
        if listing.default_limit < 1 {
            return Err(ConfigError::invalid_value(
                "listing.default_limit",
                "must be at least 1",
            ));
        }
        if listing.max_limit < listing.default_limit {
            return Err(ConfigError::invalid_value(
                "listing.max_limit",
                format!(
                    "must not be below listing.default_limit ({})",
                    listing.default_limit
                ),
            ));
        }
        Ok(())
    }
}

fn file_provider(path: &Path) -> Result<Figment, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "toml" => Ok(Figment::from(Toml::file(path))),
        "yaml" | "yml" => Ok(Figment::from(Yaml::file(path))),
        "json" => Ok(Figment::from(Json::file(path))),
        other => Err(ConfigError::UnsupportedFormat {
            format: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var("BUILDINGS_LISTING__DEFAULT_LIMIT");
        env::remove_var("BUILDINGS_LISTING__MAX_LIMIT");
    }

    #[test]
    #[serial]
    fn test_defaults_without_sources() {
        clear_env();
        let config = RegistryConfig::load(None).unwrap();
        assert_eq!(config, RegistryConfig::default());
        assert_eq!(config.listing.default_limit, 5);
        assert_eq!(config.listing.max_limit, 100);
    }

    #[test]
    #[serial]
    fn test_toml_file_overrides_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("buildings.toml");
        fs::write(&path, "[listing]\ndefault_limit = 10\n").unwrap();

        let config = RegistryConfig::load(Some(&path)).unwrap();
        assert_eq!(config.listing.default_limit, 10);
        assert_eq!(config.listing.max_limit, 100);
    }

    #[test]
    #[serial]
    fn test_yaml_file_is_supported() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("buildings.yml");
        fs::write(&path, "listing:\n  max_limit: 20\n").unwrap();

        let config = RegistryConfig::load(Some(&path)).unwrap();
        assert_eq!(config.listing.max_limit, 20);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("buildings.json");
        fs::write(&path, r#"{"listing": {"default_limit": 8}}"#).unwrap();

        env::set_var("BUILDINGS_LISTING__DEFAULT_LIMIT", "12");
        let config = RegistryConfig::load(Some(&path));
        clear_env();

        assert_eq!(config.unwrap().listing.default_limit, 12);
    }

    #[test]
    #[serial]
    fn test_missing_file_is_reported() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");
        assert!(matches!(
            RegistryConfig::load(Some(&path)),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_unknown_extension_is_rejected() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("buildings.ini");
        fs::write(&path, "listing=1").unwrap();
        assert!(matches!(
            RegistryConfig::load(Some(&path)),
            Err(ConfigError::UnsupportedFormat { format }) if format == "ini"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_default() {
        let config = RegistryConfig {
            listing: ListingConfig {
                default_limit: 0,
                max_limit: 100,
            },
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "listing.default_limit"
        ));
    }

    #[test]
    fn test_validate_rejects_max_below_default() {
        let config = RegistryConfig {
            listing: ListingConfig {
                default_limit: 10,
                max_limit: 5,
            },
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { key, .. }) if key == "listing.max_limit"
        ));
    }
}
