//! Field descriptor types.
//!
//! A [`FieldSpec`] is the raw authoring shape a client submits
//! (`{ key, type, label, options }`). A [`FieldDescriptor`] is the checked
//! form stored inside a [`crate::Schema`]; it can only be obtained through
//! [`FieldDescriptor::new`], so an enum descriptor without options never
//! exists at validation time.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};

/// The declared type of a custom field.
///
/// Unknown type names are preserved as [`FieldKind::Unsupported`] rather than
/// rejected, so a schema authored with a type this engine does not know
/// still loads and is reported per key at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    /// Decimal numbers, or strings that parse as one
    Number,
    /// Arbitrary strings
    Freeform,
    /// One of a fixed set of string options
    Enum,
    /// Any other declared type name, kept verbatim
    Unsupported(String),
}

impl FieldKind {
    /// The type name as it appears in the authoring format
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Number => "number",
            FieldKind::Freeform => "freeform",
            FieldKind::Enum => "enum",
            FieldKind::Unsupported(name) => name,
        }
    }
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "number" => FieldKind::Number,
            "freeform" => FieldKind::Freeform,
            "enum" => FieldKind::Enum,
            _ => FieldKind::Unsupported(name),
        }
    }
}

impl From<&str> for FieldKind {
    fn from(name: &str) -> Self {
        FieldKind::from(name.to_string())
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Unsupported(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw field specification as submitted when authoring a client schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    #[serde(rename = "type")]
    pub type_: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldSpec {
    /// Create a spec of any kind with no label or options
    pub fn new(key: impl Into<String>, type_: impl Into<FieldKind>) -> Self {
        Self {
            key: key.into(),
            type_: type_.into(),
            label: None,
            options: None,
        }
    }

    /// A `number` field
    pub fn number(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Number)
    }

    /// A `freeform` field
    pub fn freeform(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Freeform)
    }

    /// An `enum` field with the given options
    pub fn enumeration<I, S>(key: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: Some(options.into_iter().map(Into::into).collect()),
            ..Self::new(key, FieldKind::Enum)
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A checked description of one custom attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldSpec", into = "FieldSpec")]
pub struct FieldDescriptor {
    key: String,
    kind: FieldKind,
    label: Option<String>,
    options: IndexSet<String>,
}

impl FieldDescriptor {
    /// Check a raw spec. Fails only for an `enum` without options.
    ///
    /// Options are kept for `enum` fields only; repeated options collapse
    /// into the first occurrence.
    pub fn new(spec: FieldSpec) -> Result<Self> {
        let FieldSpec {
            key,
            type_,
            label,
            options,
        } = spec;

        let options = match type_ {
            FieldKind::Enum => {
                let options: IndexSet<String> = options.unwrap_or_default().into_iter().collect();
                if options.is_empty() {
                    return Err(FieldsError::empty_options(&key));
                }
                options
            }
            _ => IndexSet::new(),
        };

        Ok(Self {
            key,
            kind: type_,
            label,
            options,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Display label, falling back to the key.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    /// Permitted options in declaration order. Empty unless this is an enum.
    pub fn options(&self) -> &IndexSet<String> {
        &self.options
    }

    /// Exact textual membership in the option set
    pub fn allows_option(&self, value: &str) -> bool {
        self.options.contains(value)
    }
}

impl TryFrom<FieldSpec> for FieldDescriptor {
    type Error = FieldsError;

    fn try_from(spec: FieldSpec) -> Result<Self> {
        FieldDescriptor::new(spec)
    }
}

impl From<FieldDescriptor> for FieldSpec {
    fn from(descriptor: FieldDescriptor) -> Self {
        let options = match descriptor.kind {
            FieldKind::Enum => Some(descriptor.options.into_iter().collect()),
            _ => None,
        };
        FieldSpec {
            key: descriptor.key,
            type_: descriptor.kind,
            label: descriptor.label,
            options,
        }
    }
}
