//! Schema-driven projection of stored values for presentation.
//!
//! A projection always carries exactly the schema's keys, in declaration
//! order, so every listing for a client has the same column set no matter
//! what a particular building stored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::Schema;
use crate::value::{FieldValue, ValueMap};

/// Ordered key to display string map produced by [`project`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection(IndexMap<String, String>);

impl Projection {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Turn the display strings back into values: empty strings become
    /// null, everything else a string value.
    pub fn into_value_map(self) -> ValueMap {
        self.0
            .into_iter()
            .map(|(key, text)| {
                let value = if text.is_empty() {
                    FieldValue::Null
                } else {
                    FieldValue::String(text)
                };
                (key, value)
            })
            .collect()
    }
}

impl IntoIterator for Projection {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Project stored values onto a schema. Never fails.
///
/// Every declared key is emitted; absent and null values become `""`.
/// Stored keys the schema does not declare are dropped.
pub fn project(schema: &Schema, values: &ValueMap) -> Projection {
    Projection(
        schema
            .keys()
            .map(|key| {
                let text = values
                    .get(key)
                    .and_then(FieldValue::display_string)
                    .unwrap_or_default();
                (key.to_string(), text)
            })
            .collect(),
    )
}
