//! Schema: the ordered, key-unique set of custom fields a client declares.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};
use crate::types::{FieldDescriptor, FieldSpec};

/// An immutable, ordered collection of field descriptors with unique keys.
///
/// Serializes as the plain list of field specs, and deserializing runs the
/// same checks as [`Schema::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldSpec>", into = "Vec<FieldSpec>")]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    key_index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from raw specs in declaration order.
    ///
    /// Fails on the first malformed descriptor or the first key that repeats
    /// an earlier one.
    pub fn build<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator<Item = FieldSpec>,
    {
        let mut fields = Vec::new();
        let mut key_index = HashMap::new();

        for spec in specs {
            let descriptor = FieldDescriptor::new(spec)?;
            if key_index.contains_key(descriptor.key()) {
                return Err(FieldsError::duplicate_key(descriptor.key()));
            }
            key_index.insert(descriptor.key().to_string(), fields.len());
            fields.push(descriptor);
        }

        Ok(Self { fields, key_index })
    }

    /// A schema with no fields; accepts only empty (or all-null) value maps
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a descriptor by key. Unknown keys are a normal outcome.
    pub fn descriptor_for(&self, key: &str) -> Option<&FieldDescriptor> {
        self.key_index.get(key).map(|&i| &self.fields[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.key_index.contains_key(key)
    }

    /// Declared keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(FieldDescriptor::key)
    }

    /// All descriptors in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The authoring form of this schema
    pub fn to_specs(&self) -> Vec<FieldSpec> {
        self.fields.iter().cloned().map(FieldSpec::from).collect()
    }
}

impl TryFrom<Vec<FieldSpec>> for Schema {
    type Error = FieldsError;

    fn try_from(specs: Vec<FieldSpec>) -> Result<Self> {
        Schema::build(specs)
    }
}

impl From<Schema> for Vec<FieldSpec> {
    fn from(schema: Schema) -> Self {
        schema.fields.into_iter().map(FieldSpec::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    fn sample_specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::number("units").with_label("Units"),
            FieldSpec::enumeration("parking", ["Lot", "Street"]),
            FieldSpec::freeform("notes"),
        ]
    }

    #[test]
    fn build_preserves_declaration_order() {
        let schema = Schema::build(sample_specs()).unwrap();
        let keys: Vec<&str> = schema.keys().collect();
        assert_eq!(keys, ["units", "parking", "notes"]);
        assert_eq!(schema.len(), 3);
    }

    #[test]
    fn descriptor_lookup() {
        let schema = Schema::build(sample_specs()).unwrap();
        let parking = schema.descriptor_for("parking").unwrap();
        assert_eq!(parking.kind(), &FieldKind::Enum);
        assert!(schema.descriptor_for("bogus").is_none());
        assert!(schema.descriptor_for("Units").is_none());
    }

    #[test]
    fn duplicate_key_is_malformed() {
        let err = Schema::build(vec![
            FieldSpec::number("units"),
            FieldSpec::freeform("notes"),
            FieldSpec::freeform("units"),
            FieldSpec::freeform("notes"),
        ])
        .unwrap_err();
        assert_eq!(err, FieldsError::duplicate_key("units"));
    }

    #[test]
    fn malformed_descriptor_fails_build() {
        let err = Schema::build(vec![
            FieldSpec::number("units"),
            FieldSpec::enumeration("color", Vec::<String>::new()),
        ])
        .unwrap_err();
        assert_eq!(err, FieldsError::empty_options("color"));
    }

    #[test]
    fn empty_schema_builds() {
        let schema = Schema::build(Vec::new()).unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema, Schema::empty());
    }

    #[test]
    fn deserializes_from_authoring_list() {
        let json = r#"[
            {"key": "units", "type": "number", "label": "Units"},
            {"key": "parking", "type": "enum", "options": ["Lot", "Street"]}
        ]"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), ["units", "parking"]);
    }

    #[test]
    fn deserialization_rejects_duplicates() {
        let json = r#"[{"key": "a", "type": "number"}, {"key": "a", "type": "freeform"}]"#;
        let err = serde_json::from_str::<Schema>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate field key: a"));
    }

    #[test]
    fn specs_survive_a_serde_pass() {
        let schema = Schema::build(sample_specs()).unwrap();
        let json = serde_json::to_string(&schema).unwrap();
        let reparsed: Schema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, reparsed);
        assert_eq!(reparsed.to_specs(), sample_specs());
    }
}
