//! Custom field values as stored on a building.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A single custom field value.
///
/// Values arrive from JSON or YAML as bare scalars, so this is untagged.
/// Nested arrays and objects are not representable and fail to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Present but not supplied
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical display form, or `None` for null.
    ///
    /// Strings are returned verbatim, numbers in plain decimal notation and
    /// booleans as `true` / `false`.
    pub fn display_string(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::String(s) => Some(s.clone()),
        }
    }

    /// Short name of the variant, for log fields
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<f64> for FieldValue {
    /// Non-finite floats have no JSON form and become null.
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// The custom values supplied for one building, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap(IndexMap<String, FieldValue>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value, returning the previous one
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries whose value is not null, i.e. the values actually supplied
    pub fn supplied(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.iter().filter(|(_, v)| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<IndexMap<String, FieldValue>> for ValueMap {
    fn from(map: IndexMap<String, FieldValue>) -> Self {
        Self(map)
    }
}

impl IntoIterator for ValueMap {
    type Item = (String, FieldValue);
    type IntoIter = indexmap::map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_deserialize_to_matching_variants() {
        let map: ValueMap = serde_json::from_value(json!({
            "units": 12,
            "area": 2.5,
            "notes": "corner lot",
            "heated": true,
            "parking": null
        }))
        .unwrap();

        assert_eq!(map.get("units"), Some(&FieldValue::from(12i64)));
        assert_eq!(map.get("area"), Some(&FieldValue::from(2.5)));
        assert_eq!(map.get("notes"), Some(&FieldValue::from("corner lot")));
        assert_eq!(map.get("heated"), Some(&FieldValue::Bool(true)));
        assert_eq!(map.get("parking"), Some(&FieldValue::Null));
    }

    #[test]
    fn nested_values_are_rejected() {
        assert!(serde_json::from_value::<ValueMap>(json!({"tags": ["a"]})).is_err());
        assert!(serde_json::from_value::<ValueMap>(json!({"meta": {"a": 1}})).is_err());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let map = ValueMap::new().with("b", 1i64).with("a", 2i64).with("c", 3i64);
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
    }

    #[test]
    fn display_string_for_each_variant() {
        assert_eq!(FieldValue::Null.display_string(), None);
        assert_eq!(FieldValue::from(12i64).display_string().as_deref(), Some("12"));
        assert_eq!(FieldValue::from(2.5).display_string().as_deref(), Some("2.5"));
        assert_eq!(FieldValue::from(false).display_string().as_deref(), Some("false"));
        assert_eq!(FieldValue::from("x").display_string().as_deref(), Some("x"));
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert!(FieldValue::from(f64::NAN).is_null());
        assert!(FieldValue::from(f64::INFINITY).is_null());
    }

    #[test]
    fn supplied_skips_nulls() {
        let map = ValueMap::new().with("a", FieldValue::Null).with("b", "x");
        let supplied: Vec<&str> = map.supplied().map(|(k, _)| k).collect();
        assert_eq!(supplied, ["b"]);
    }

    #[test]
    fn serializes_back_to_plain_object() {
        let map = ValueMap::new().with("units", 12i64).with("parking", FieldValue::Null);
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({"units": 12, "parking": null})
        );
    }
}
