//! Custom field schemas for buildings
//!
//! `buildings-fields` is the schema-driven core of the buildings workspace.
//! A client declares an ordered list of custom fields; every building owned
//! by that client stores a free-form map of values for those fields.
//!
//! # Architecture
//!
//! - **Schema**: ordered, key-unique [`FieldDescriptor`]s, checked once at
//!   authoring time by [`Schema::build`]
//! - **Values**: a [`ValueMap`] of scalar [`FieldValue`]s in supplied order
//! - **Validation**: [`validate`] gates writes; unknown keys are reported
//!   alone, type mismatches are reported together
//! - **Projection**: [`project`] renders exactly the declared keys, in order,
//!   with `""` for anything not supplied
//!
//! Everything here is pure and synchronous. A schema is an owned value, so
//! callers snapshot it (clone) for the duration of a validate or project call.
//!
//! ```
//! use buildings_fields::{project, validate, FieldSpec, Schema, ValueMap};
//!
//! let schema = Schema::build(vec![
//!     FieldSpec::number("units"),
//!     FieldSpec::enumeration("parking", ["Lot", "Street"]),
//! ])?;
//!
//! let values = ValueMap::new().with("units", "12").with("parking", "Garage");
//! assert_eq!(
//!     validate(&schema, &values).messages(),
//!     ["parking expected one of Lot, Street"]
//! );
//!
//! let projection = project(&schema, &ValueMap::new().with("units", 12i64));
//! assert_eq!(projection.get("parking"), Some(""));
//! # Ok::<(), buildings_fields::FieldsError>(())
//! ```

pub mod error;
pub mod projection;
pub mod schema;
pub mod types;
pub mod validation;
pub mod value;

pub use error::{FieldsError, Result};
pub use projection::{project, Projection};
pub use schema::Schema;
pub use types::{FieldDescriptor, FieldKind, FieldSpec};
pub use validation::{parse_decimal, validate, ValidationResult, Violation};
pub use value::{FieldValue, ValueMap};
