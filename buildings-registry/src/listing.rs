//! Paginated building listings with projected custom fields.

use buildings_fields::Projection;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::building::Building;
use crate::config::ListingConfig;
use crate::types::ClientId;

/// Requested page of a listing. Out-of-range values are clamped, never
/// rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Resolve to a concrete `(page, limit)`, both at least 1
    pub fn resolve(&self, config: &ListingConfig) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1) as u64;
        let max_limit = i64::from(config.max_limit.max(1));
        let limit = self
            .limit
            .unwrap_or_else(|| i64::from(config.default_limit))
            .clamp(1, max_limit) as u64;
        (page, limit)
    }
}

/// Pagination metadata for a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total_count: usize,
    pub total_pages: u64,
    pub page: u64,
    pub limit: u64,
}

impl PageMeta {
    pub fn new(total_count: usize, page: u64, limit: u64) -> Self {
        Self {
            total_count,
            total_pages: (total_count as u64).div_ceil(limit),
            page,
            limit,
        }
    }

    /// Number of rows skipped before this page. Saturates for huge page
    /// numbers, which then simply yield an empty page.
    pub fn offset(&self) -> usize {
        let skipped = self.page.saturating_sub(1).saturating_mul(self.limit);
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }
}

/// One listing row: core attributes followed by the owner's projected
/// custom fields.
///
/// Serializes as a flat object. A custom key that repeats a core attribute
/// name takes the core attribute's place with the custom value.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingRow {
    pub id: String,
    pub client_id: ClientId,
    pub client_name: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub year_built: i32,
    pub floors: i32,
    pub custom_fields: Projection,
}

impl BuildingRow {
    pub fn new(building: &Building, client_name: &str, custom_fields: Projection) -> Self {
        let core = &building.attributes;
        Self {
            id: building.id.to_string(),
            client_id: building.client_id,
            client_name: client_name.to_string(),
            name: core.name.clone(),
            address: core.address.clone(),
            city: core.city.clone(),
            state: core.state.clone(),
            postal_code: core.postal_code.clone(),
            year_built: core.year_built,
            floors: core.floors,
            custom_fields,
        }
    }
}

/// Core columns of a listing row, in output order
const CORE_COLUMNS: [&str; 10] = [
    "id",
    "client_name",
    "name",
    "client_id",
    "address",
    "city",
    "state",
    "postal_code",
    "year_built",
    "floors",
];

impl Serialize for BuildingRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        fn entry<M, V>(
            map: &mut M,
            custom: &Projection,
            name: &str,
            value: &V,
        ) -> Result<(), M::Error>
        where
            M: SerializeMap,
            V: Serialize + ?Sized,
        {
            match custom.get(name) {
                Some(text) => map.serialize_entry(name, text),
                None => map.serialize_entry(name, value),
            }
        }

        let custom = &self.custom_fields;
        let extra: Vec<(&str, &str)> = custom
            .iter()
            .filter(|(key, _)| !CORE_COLUMNS.iter().any(|column| column == key))
            .collect();

        let mut map = serializer.serialize_map(Some(CORE_COLUMNS.len() + extra.len()))?;
        entry(&mut map, custom, "id", &self.id)?;
        entry(&mut map, custom, "client_name", &self.client_name)?;
        entry(&mut map, custom, "name", &self.name)?;
        entry(&mut map, custom, "client_id", &self.client_id)?;
        entry(&mut map, custom, "address", &self.address)?;
        entry(&mut map, custom, "city", &self.city)?;
        entry(&mut map, custom, "state", &self.state)?;
        entry(&mut map, custom, "postal_code", &self.postal_code)?;
        entry(&mut map, custom, "year_built", &self.year_built)?;
        entry(&mut map, custom, "floors", &self.floors)?;
        for (key, value) in extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One page of buildings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingPage {
    pub buildings: Vec<BuildingRow>,
    pub meta: PageMeta,
}
