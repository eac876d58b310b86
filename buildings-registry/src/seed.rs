//! Seed data: clients with their schemas and buildings, loaded from YAML.

use std::path::Path;

use buildings_fields::{FieldSpec, ValueMap};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use crate::building::{BuildingAttributes, NewBuilding};
use crate::client::NewClient;
use crate::context::RegistryContext;
use crate::error::{RegistryError, Result};

/// A complete set of clients to load into an empty registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub clients: Vec<SeedClient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedClient {
    pub name: String,
    #[serde(default)]
    pub custom_fields: Vec<FieldSpec>,
    #[serde(default)]
    pub buildings: Vec<SeedBuilding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedBuilding {
    #[serde(flatten)]
    pub attributes: BuildingAttributes,
    #[serde(default)]
    pub custom_field_values: ValueMap,
}

/// Counts of records created by a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub clients: usize,
    pub buildings: usize,
}

impl SeedData {
    /// Parse seed data from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a YAML seed file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading seed file");
        let content = fs::read_to_string(path).await?;
        Self::from_yaml(&content)
    }

    pub fn building_count(&self) -> usize {
        self.clients.iter().map(|c| c.buildings.len()).sum()
    }
}

impl RegistryContext {
    /// Create every seeded client and building through the validating
    /// operations. Stops at the first rejected record.
    pub async fn seed(&self, data: &SeedData) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for seed_client in &data.clients {
            let client = self
                .create_client(NewClient {
                    name: seed_client.name.clone(),
                    custom_fields: seed_client.custom_fields.clone(),
                })
                .await
                .map_err(|e| RegistryError::seed(format!("client '{}': {e}", seed_client.name)))?;
            report.clients += 1;

            for (index, seed_building) in seed_client.buildings.iter().enumerate() {
                let new_building = NewBuilding::new(client.id, seed_building.attributes.clone())
                    .with_values(seed_building.custom_field_values.clone());
                self.create_building(new_building).await.map_err(|e| {
                    RegistryError::seed(format!(
                        "building {} of client '{}': {e}",
                        index + 1,
                        seed_client.name
                    ))
                })?;
                report.buildings += 1;
            }
        }

        info!(
            clients = report.clients,
            buildings = report.buildings,
            "seed data loaded"
        );
        Ok(report)
    }
}
