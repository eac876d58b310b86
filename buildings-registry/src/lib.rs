//! In-memory registry of clients and their buildings
//!
//! Each client declares a custom field [`Schema`](buildings_fields::Schema);
//! every building it owns is checked against that schema on every write and
//! projected through it on every listing.
//!
//! ## Overview
//!
//! - **Clients** own a schema. Replacing it never rewrites stored buildings.
//! - **Buildings** carry fixed core attributes plus a free-form map of custom
//!   values, stored exactly as accepted
//! - **Listings** are paginated and always show every declared key of the
//!   owner's current schema
//! - **Seeding** loads sample or YAML-described clients through the same
//!   validating operations
//!
//! ## Basic Usage
//!
//! ```rust
//! use buildings_fields::{FieldSpec, ValueMap};
//! use buildings_registry::{
//!     BuildingAttributes, NewBuilding, NewClient, PageRequest, RegistryContext,
//! };
//!
//! # async fn example() -> buildings_registry::Result<()> {
//! let ctx = RegistryContext::default();
//! let client = ctx
//!     .create_client(NewClient::new("Downtown LLC").with_field(FieldSpec::number("units")))
//!     .await?;
//!
//! let attributes = BuildingAttributes::default()
//!     .with_name("Harbor View")
//!     .with_address("100 Main St")
//!     .with_city("Metropolis")
//!     .with_state("NY")
//!     .with_postal_code("10001")
//!     .with_year_built(1980)
//!     .with_floors(3);
//! ctx.create_building(
//!     NewBuilding::new(client.id, attributes).with_values(ValueMap::new().with("units", 12i64)),
//! )
//! .await?;
//!
//! let page = ctx.list_buildings(PageRequest::default()).await;
//! assert_eq!(page.buildings[0].custom_fields.get("units"), Some("12"));
//! # Ok(())
//! # }
//! ```

pub mod building;
pub mod client;
pub mod config;
pub mod context;
pub mod defaults;
pub mod error;
pub mod listing;
pub mod seed;
pub mod types;

pub use building::{
    Building, BuildingAttributes, BuildingDetail, BuildingUpdate, CoreAttributes, NewBuilding,
};
pub use client::{Client, ClientSummary, ClientUpdate, NewClient};
pub use config::{ListingConfig, RegistryConfig};
pub use context::RegistryContext;
pub use error::{ConfigError, RegistryError, Result};
pub use listing::{BuildingPage, BuildingRow, PageMeta, PageRequest};
pub use seed::{SeedBuilding, SeedClient, SeedData, SeedReport};
pub use types::{BuildingId, ClientId};
