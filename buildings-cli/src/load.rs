//! Registry start-up: configuration plus seed data.

use std::path::Path;

use buildings_registry::{defaults, RegistryConfig, RegistryContext, RegistryError, SeedData};
use tracing::debug;

use crate::error::Result;

/// Build a registry from an optional config file and an optional YAML seed.
///
/// Without a seed file the built-in sample clients are loaded.
pub async fn load_registry(
    seed: Option<&Path>,
    config: Option<&Path>,
) -> Result<RegistryContext> {
    let config = RegistryConfig::load(config).map_err(RegistryError::from)?;
    let ctx = RegistryContext::new(config);

    let data = match seed {
        Some(path) => SeedData::load(path).await?,
        None => defaults::sample_seed(),
    };
    let report = ctx.seed(&data).await?;
    debug!(
        clients = report.clients,
        buildings = report.buildings,
        "registry ready"
    );
    Ok(ctx)
}
