//! Clients: the owners that declare a custom field schema.

use buildings_fields::{FieldSpec, Schema};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ClientId;

/// A client and the schema its buildings are held to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    /// Serialized in the authoring shape, a list of field specs
    #[serde(rename = "custom_fields")]
    pub schema: Schema,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a client
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewClient {
    pub name: String,
    #[serde(default)]
    pub custom_fields: Vec<FieldSpec>,
}

impl NewClient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            custom_fields: Vec::new(),
        }
    }

    /// Append a custom field spec
    pub fn with_field(mut self, spec: FieldSpec) -> Self {
        self.custom_fields.push(spec);
        self
    }
}

/// Partial update of a client. A supplied field list replaces the schema
/// wholesale; stored buildings are not re-validated.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<FieldSpec>>,
}

impl ClientUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_fields(mut self, specs: Vec<FieldSpec>) -> Self {
        self.custom_fields = Some(specs);
        self
    }
}

/// A client together with how many buildings it owns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSummary {
    #[serde(flatten)]
    pub client: Client,
    pub total_count: usize,
}

/// Check a client's name and schema, collecting every problem.
pub(crate) fn check_client(
    name: &str,
    specs: Vec<FieldSpec>,
) -> std::result::Result<Schema, Vec<String>> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("name can't be blank".to_string());
    }
    let schema = Schema::build(specs).map_err(|e| errors.push(e.to_string()));
    match schema {
        Ok(schema) if errors.is_empty() => Ok(schema),
        _ => Err(errors),
    }
}
