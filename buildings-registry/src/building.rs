//! Buildings: fixed core attributes plus client-defined custom field values.

use buildings_fields::{FieldValue, ValueMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{BuildingId, ClientId};

/// Checked core attributes of a stored building
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreAttributes {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub year_built: i32,
    pub floors: i32,
}

/// Core attributes as submitted by a caller.
///
/// Text attributes arrive as arbitrary scalars so that a number in place of
/// a name can be reported instead of failing deserialization. Every field is
/// optional: on create a missing value is an error, on update it means
/// "unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floors: Option<i32>,
}

impl BuildingAttributes {
    pub fn with_name(mut self, name: impl Into<FieldValue>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<FieldValue>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<FieldValue>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<FieldValue>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_postal_code(mut self, postal_code: impl Into<FieldValue>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn with_year_built(mut self, year_built: i32) -> Self {
        self.year_built = Some(year_built);
        self
    }

    pub fn with_floors(mut self, floors: i32) -> Self {
        self.floors = Some(floors);
        self
    }

    /// Apply every supplied, non-null attribute of `changes` on top of `self`
    pub fn overlay(mut self, changes: BuildingAttributes) -> Self {
        fn pick(current: Option<FieldValue>, change: Option<FieldValue>) -> Option<FieldValue> {
            match change {
                Some(value) if !value.is_null() => Some(value),
                _ => current,
            }
        }

        self.name = pick(self.name, changes.name);
        self.address = pick(self.address, changes.address);
        self.city = pick(self.city, changes.city);
        self.state = pick(self.state, changes.state);
        self.postal_code = pick(self.postal_code, changes.postal_code);
        self.year_built = changes.year_built.or(self.year_built);
        self.floors = changes.floors.or(self.floors);
        self
    }

    /// Check every attribute, collecting all problems in attribute order
    pub fn check(&self) -> Result<CoreAttributes, Vec<String>> {
        let mut errors = Vec::new();

        let name = check_text("name", self.name.as_ref(), &mut errors);
        let address = check_text("address", self.address.as_ref(), &mut errors);
        let city = check_text("city", self.city.as_ref(), &mut errors);
        let state = check_text("state", self.state.as_ref(), &mut errors);

        let postal_code = match self.postal_code.as_ref().and_then(FieldValue::display_string) {
            Some(code) if !code.trim().is_empty() => Some(code),
            _ => {
                errors.push(blank("postal_code"));
                None
            }
        };
        if self.year_built.is_none() {
            errors.push(blank("year_built"));
        }
        if self.floors.is_none() {
            errors.push(blank("floors"));
        }

        match (name, address, city, state, postal_code, self.year_built, self.floors) {
            (
                Some(name),
                Some(address),
                Some(city),
                Some(state),
                Some(postal_code),
                Some(year_built),
                Some(floors),
            ) if errors.is_empty() => Ok(CoreAttributes {
                name,
                address,
                city,
                state,
                postal_code,
                year_built,
                floors,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&CoreAttributes> for BuildingAttributes {
    fn from(core: &CoreAttributes) -> Self {
        Self {
            name: Some(core.name.as_str().into()),
            address: Some(core.address.as_str().into()),
            city: Some(core.city.as_str().into()),
            state: Some(core.state.as_str().into()),
            postal_code: Some(core.postal_code.as_str().into()),
            year_built: Some(core.year_built),
            floors: Some(core.floors),
        }
    }
}

fn blank(attr: &str) -> String {
    format!("{attr} can't be blank")
}

fn check_text(attr: &str, value: Option<&FieldValue>, errors: &mut Vec<String>) -> Option<String> {
    let value = match value {
        None | Some(FieldValue::Null) => {
            errors.push(blank(attr));
            return None;
        }
        Some(value) => value,
    };

    let Some(text) = value.as_str() else {
        errors.push(format!("{attr} must be a string"));
        return None;
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.push(blank(attr));
        return None;
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(format!("{attr} must be a string"));
        return None;
    }
    Some(text.to_string())
}

/// A stored building. Custom field values are kept exactly as accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub client_id: ClientId,
    #[serde(flatten)]
    pub attributes: CoreAttributes,
    #[serde(default)]
    pub custom_field_values: ValueMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a building
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewBuilding {
    pub client_id: ClientId,
    #[serde(flatten)]
    pub attributes: BuildingAttributes,
    #[serde(default)]
    pub custom_field_values: ValueMap,
}

impl NewBuilding {
    pub fn new(client_id: ClientId, attributes: BuildingAttributes) -> Self {
        Self {
            client_id,
            attributes,
            custom_field_values: ValueMap::new(),
        }
    }

    pub fn with_values(mut self, values: ValueMap) -> Self {
        self.custom_field_values = values;
        self
    }
}

/// Partial update of a building.
///
/// A supplied `client_id` moves the building to that client. Supplied
/// `custom_field_values` replace the stored map wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(flatten)]
    pub attributes: BuildingAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_field_values: Option<ValueMap>,
}

/// A stored building with the name of its owning client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildingDetail {
    #[serde(flatten)]
    pub building: Building,
    pub client_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> BuildingAttributes {
        BuildingAttributes::default()
            .with_name("Harbor View")
            .with_address("100 Main St")
            .with_city("Metropolis")
            .with_state("NY")
            .with_postal_code("10001")
            .with_year_built(1980)
            .with_floors(3)
    }

    #[test]
    fn complete_attributes_pass() {
        let core = complete().check().unwrap();
        assert_eq!(core.name, "Harbor View");
        assert_eq!(core.postal_code, "10001");
        assert_eq!(core.floors, 3);
    }

    #[test]
    fn missing_attributes_are_blank() {
        let errors = BuildingAttributes::default().check().unwrap_err();
        assert_eq!(
            errors,
            [
                "name can't be blank",
                "address can't be blank",
                "city can't be blank",
                "state can't be blank",
                "postal_code can't be blank",
                "year_built can't be blank",
                "floors can't be blank",
            ]
        );
    }

    #[test]
    fn numeric_text_attributes_are_rejected() {
        let attrs = complete().with_name(42i64).with_city("12345");
        assert_eq!(
            attrs.check().unwrap_err(),
            ["name must be a string", "city must be a string"]
        );
    }

    #[test]
    fn whitespace_only_text_is_blank() {
        let attrs = complete().with_state("   ");
        assert_eq!(attrs.check().unwrap_err(), ["state can't be blank"]);
    }

    #[test]
    fn numeric_postal_code_is_rendered_as_text() {
        let core = complete().with_postal_code(2134i64).check().unwrap();
        assert_eq!(core.postal_code, "2134");
    }

    #[test]
    fn overlay_keeps_unsupplied_and_null_attributes() {
        let current = complete();
        let changes = BuildingAttributes {
            city: Some("Gotham".into()),
            name: Some(FieldValue::Null),
            floors: Some(7),
            ..Default::default()
        };
        let core = current.overlay(changes).check().unwrap();
        assert_eq!(core.name, "Harbor View");
        assert_eq!(core.city, "Gotham");
        assert_eq!(core.floors, 7);
        assert_eq!(core.year_built, 1980);
    }

    #[test]
    fn new_building_reads_flat_json() {
        let json = r#"{
            "client_id": 1,
            "name": "101 Main St",
            "address": "101 Main St",
            "city": "Somewhere",
            "state": "NY",
            "postal_code": "12345",
            "year_built": 1980,
            "floors": 5,
            "custom_field_values": {"units": 12}
        }"#;
        let new_building: NewBuilding = serde_json::from_str(json).unwrap();
        assert_eq!(new_building.client_id, ClientId(1));
        assert_eq!(new_building.custom_field_values.len(), 1);
        let core = new_building.attributes.check().unwrap();
        assert_eq!(core.year_built, 1980);
    }

    #[test]
    fn core_attributes_round_trip_into_submission() {
        let core = complete().check().unwrap();
        let resubmitted = BuildingAttributes::from(&core).check().unwrap();
        assert_eq!(core, resubmitted);
    }
}
