//! RegistryContext - the in-memory store of clients and buildings
//!
//! Every write goes through the custom field validator of the owning client
//! while the write lock is held, so a building can never be stored against a
//! schema it was not checked with at the time.

use std::collections::BTreeMap;

use buildings_fields::{project, validate, Projection, Schema, ValidationResult, ValueMap};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::building::{Building, BuildingAttributes, BuildingDetail, BuildingUpdate, NewBuilding};
use crate::client::{check_client, Client, ClientSummary, ClientUpdate, NewClient};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::listing::{BuildingPage, BuildingRow, PageMeta, PageRequest};
use crate::types::{BuildingId, ClientId};

#[derive(Debug, Default)]
struct RegistryState {
    clients: BTreeMap<ClientId, Client>,
    buildings: BTreeMap<BuildingId, Building>,
    next_client_id: u64,
    next_building_id: u64,
}

impl RegistryState {
    fn allocate_client_id(&mut self) -> ClientId {
        self.next_client_id += 1;
        ClientId(self.next_client_id)
    }

    fn allocate_building_id(&mut self) -> BuildingId {
        self.next_building_id += 1;
        BuildingId(self.next_building_id)
    }

    fn client(&self, id: ClientId) -> Result<&Client> {
        self.clients
            .get(&id)
            .ok_or(RegistryError::ClientNotFound { id })
    }

    fn building_count(&self, client_id: ClientId) -> usize {
        self.buildings
            .values()
            .filter(|b| b.client_id == client_id)
            .count()
    }
}

/// Shared handle to the registry. All operations take `&self`.
#[derive(Debug, Default)]
pub struct RegistryContext {
    config: RegistryConfig,
    state: RwLock<RegistryState>,
}

impl RegistryContext {
    /// Create an empty registry
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            state: RwLock::new(RegistryState::default()),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // =========================================================================
    // Clients
    // =========================================================================

    /// Create a client, building its schema from the submitted field specs
    pub async fn create_client(&self, new_client: NewClient) -> Result<Client> {
        let NewClient {
            name,
            custom_fields,
        } = new_client;
        let schema = check_client(&name, custom_fields)
            .map_err(|errors| RegistryError::InvalidClient { errors })?;

        let mut state = self.state.write().await;
        let now = Utc::now();
        let client = Client {
            id: state.allocate_client_id(),
            name,
            schema,
            created_at: now,
            updated_at: now,
        };
        state.clients.insert(client.id, client.clone());

        info!(client_id = %client.id, fields = client.schema.len(), "client created");
        Ok(client)
    }

    /// Rename a client and/or replace its schema wholesale.
    ///
    /// Buildings already stored for the client keep their values even when
    /// they no longer satisfy the new schema.
    pub async fn update_client(&self, id: ClientId, update: ClientUpdate) -> Result<Client> {
        let mut state = self.state.write().await;
        let current = state.client(id)?;

        let name = update.name.unwrap_or_else(|| current.name.clone());
        let specs = update
            .custom_fields
            .unwrap_or_else(|| current.schema.to_specs());
        let schema = check_client(&name, specs)
            .map_err(|errors| RegistryError::InvalidClient { errors })?;

        let client = state
            .clients
            .get_mut(&id)
            .ok_or(RegistryError::ClientNotFound { id })?;
        client.name = name;
        client.schema = schema;
        client.updated_at = Utc::now();

        info!(client_id = %id, fields = client.schema.len(), "client updated");
        Ok(client.clone())
    }

    /// A client together with its building count
    pub async fn get_client(&self, id: ClientId) -> Result<ClientSummary> {
        let state = self.state.read().await;
        let client = state.client(id)?.clone();
        Ok(ClientSummary {
            total_count: state.building_count(id),
            client,
        })
    }

    /// All clients ordered by id
    pub async fn list_clients(&self) -> Vec<Client> {
        self.state.read().await.clients.values().cloned().collect()
    }

    /// Remove a client and every building it owns
    pub async fn delete_client(&self, id: ClientId) -> Result<Client> {
        let mut state = self.state.write().await;
        let client = state
            .clients
            .remove(&id)
            .ok_or(RegistryError::ClientNotFound { id })?;

        let before = state.buildings.len();
        state.buildings.retain(|_, b| b.client_id != id);
        let removed = before - state.buildings.len();

        info!(client_id = %id, buildings = removed, "client deleted");
        Ok(client)
    }

    /// Snapshot of a client's current schema
    pub async fn schema_for(&self, id: ClientId) -> Result<Schema> {
        Ok(self.state.read().await.client(id)?.schema.clone())
    }

    /// Validate values against a client's schema without storing anything
    pub async fn validate_values(
        &self,
        id: ClientId,
        values: &ValueMap,
    ) -> Result<ValidationResult> {
        let schema = self.schema_for(id).await?;
        Ok(validate(&schema, values))
    }

    /// Project values onto a client's schema without storing anything
    pub async fn project_values(&self, id: ClientId, values: &ValueMap) -> Result<Projection> {
        let schema = self.schema_for(id).await?;
        Ok(project(&schema, values))
    }

    // =========================================================================
    // Buildings
    // =========================================================================

    /// Create a building owned by an existing client
    pub async fn create_building(&self, new_building: NewBuilding) -> Result<Building> {
        let NewBuilding {
            client_id,
            attributes,
            custom_field_values,
        } = new_building;

        let mut state = self.state.write().await;
        let client = state
            .clients
            .get(&client_id)
            .ok_or(RegistryError::UnknownClientId { id: client_id })?;

        let core = check_building(client, attributes.check(), &custom_field_values)?;

        let now = Utc::now();
        let building = Building {
            id: state.allocate_building_id(),
            client_id,
            attributes: core,
            custom_field_values,
            created_at: now,
            updated_at: now,
        };
        state.buildings.insert(building.id, building.clone());

        info!(building_id = %building.id, client_id = %client_id, "building created");
        Ok(building)
    }

    /// Apply a partial update, re-checking the merged building against the
    /// schema of its (possibly new) owner
    pub async fn update_building(
        &self,
        id: BuildingId,
        update: BuildingUpdate,
    ) -> Result<Building> {
        let BuildingUpdate {
            client_id,
            attributes,
            custom_field_values,
        } = update;

        let mut state = self.state.write().await;
        let current = state
            .buildings
            .get(&id)
            .ok_or(RegistryError::BuildingNotFound { id })?;

        let owner_id = client_id.unwrap_or(current.client_id);
        let owner = state
            .clients
            .get(&owner_id)
            .ok_or(RegistryError::UnknownClientId { id: owner_id })?;

        let merged = BuildingAttributes::from(&current.attributes).overlay(attributes);
        let values = custom_field_values.unwrap_or_else(|| current.custom_field_values.clone());
        let core = check_building(owner, merged.check(), &values)?;

        let building = state
            .buildings
            .get_mut(&id)
            .ok_or(RegistryError::BuildingNotFound { id })?;
        building.client_id = owner_id;
        building.attributes = core;
        building.custom_field_values = values;
        building.updated_at = Utc::now();

        info!(building_id = %id, client_id = %owner_id, "building updated");
        Ok(building.clone())
    }

    /// A stored building, values unprojected, with its owner's name
    pub async fn get_building(&self, id: BuildingId) -> Result<BuildingDetail> {
        let state = self.state.read().await;
        let building = state
            .buildings
            .get(&id)
            .ok_or(RegistryError::BuildingNotFound { id })?;
        let client_name = state.client(building.client_id)?.name.clone();
        Ok(BuildingDetail {
            building: building.clone(),
            client_name,
        })
    }

    /// One page of buildings ordered by id, each projected under its owner's
    /// current schema
    pub async fn list_buildings(&self, request: PageRequest) -> BuildingPage {
        let (page, limit) = request.resolve(&self.config.listing);
        let state = self.state.read().await;
        let meta = PageMeta::new(state.buildings.len(), page, limit);

        let buildings = state
            .buildings
            .values()
            .skip(meta.offset())
            .take(limit as usize)
            .filter_map(|building| {
                let Some(client) = state.clients.get(&building.client_id) else {
                    warn!(building_id = %building.id, "building has no owning client");
                    return None;
                };
                let projection = project(&client.schema, &building.custom_field_values);
                Some(BuildingRow::new(building, &client.name, projection))
            })
            .collect();

        debug!(page, limit, total = meta.total_count, "listed buildings");
        BuildingPage { buildings, meta }
    }
}

/// Combine core attribute problems and custom field violations into one
/// rejection
fn check_building<T>(
    owner: &Client,
    core: std::result::Result<T, Vec<String>>,
    values: &ValueMap,
) -> Result<T> {
    let violations = validate(&owner.schema, values);
    match (core, violations) {
        (Ok(core), ValidationResult::Valid) => Ok(core),
        (core, violations) => {
            let mut errors = core.err().unwrap_or_default();
            errors.extend(violations.messages());
            debug!(
                client_id = %owner.id,
                violations = errors.len(),
                "building rejected"
            );
            Err(RegistryError::InvalidBuilding { errors })
        }
    }
}
