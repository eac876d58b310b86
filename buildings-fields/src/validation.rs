//! Validation of a building's custom values against its client's schema.
//!
//! Checks run in two phases. Unknown keys are checked first and, when any
//! are found, they are the only thing reported. Otherwise every supplied
//! value is type checked and all mismatches are reported together.
//!
//! A null value means "not supplied": it is legal for any declared type, but
//! an undeclared key is unknown whatever its value.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::schema::Schema;
use crate::types::{FieldDescriptor, FieldKind};
use crate::value::{FieldValue, ValueMap};

/// One reason a value map was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Keys supplied that the schema does not declare, in supplied order
    UnknownKeys(Vec<String>),
    ExpectedFreeform { key: String },
    ExpectedNumber { key: String },
    ExpectedOption { key: String, options: Vec<String> },
    /// The schema declares a type this engine cannot check
    UnsupportedType { key: String, type_name: String },
}

impl Violation {
    /// The offending key, for per-key violations
    pub fn key(&self) -> Option<&str> {
        match self {
            Violation::UnknownKeys(_) => None,
            Violation::ExpectedFreeform { key }
            | Violation::ExpectedNumber { key }
            | Violation::ExpectedOption { key, .. }
            | Violation::UnsupportedType { key, .. } => Some(key),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnknownKeys(keys) => {
                write!(f, "contains unknown keys: {}", keys.join(", "))
            }
            Violation::ExpectedFreeform { key } => write!(f, "{key} expected freeform/string"),
            Violation::ExpectedNumber { key } => write!(f, "{key} expected number"),
            Violation::ExpectedOption { key, options } => {
                write!(f, "{key} expected one of {}", options.join(", "))
            }
            Violation::UnsupportedType { key, type_name } => {
                write!(f, "{key} has unsupported type {type_name}")
            }
        }
    }
}

impl Serialize for Violation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of [`validate`]. Not an error: callers decide what rejection means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(violations) => violations,
        }
    }

    /// Human readable violation strings, in report order
    pub fn messages(&self) -> Vec<String> {
        self.violations().iter().map(ToString::to_string).collect()
    }

    /// `Ok(())` when valid, otherwise the violations
    pub fn into_result(self) -> Result<(), Vec<Violation>> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(violations) => Err(violations),
        }
    }
}

/// Validate a value map against a schema.
pub fn validate(schema: &Schema, values: &ValueMap) -> ValidationResult {
    let unknown: Vec<String> = values
        .keys()
        .filter(|key| !schema.contains_key(key))
        .map(str::to_string)
        .collect();

    if !unknown.is_empty() {
        return ValidationResult::Invalid(vec![Violation::UnknownKeys(unknown)]);
    }

    let violations: Vec<Violation> = values
        .supplied()
        .filter_map(|(key, value)| {
            let descriptor = schema.descriptor_for(key)?;
            check_value(descriptor, value)
        })
        .collect();

    if violations.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(violations)
    }
}

/// Apply a descriptor's type rule to one non-null value.
fn check_value(descriptor: &FieldDescriptor, value: &FieldValue) -> Option<Violation> {
    let key = descriptor.key().to_string();
    match descriptor.kind() {
        FieldKind::Freeform => match value {
            FieldValue::String(_) => None,
            _ => Some(Violation::ExpectedFreeform { key }),
        },
        FieldKind::Number => match value {
            FieldValue::Number(_) => None,
            FieldValue::String(s) if parse_decimal(s).is_some() => None,
            _ => Some(Violation::ExpectedNumber { key }),
        },
        FieldKind::Enum => match value {
            FieldValue::String(s) if descriptor.allows_option(s) => None,
            _ => Some(Violation::ExpectedOption {
                key,
                options: descriptor.options().iter().cloned().collect(),
            }),
        },
        FieldKind::Unsupported(type_name) => {
            warn!(%key, %type_name, "unsupported field type reached validation");
            Some(Violation::UnsupportedType {
                key,
                type_name: type_name.clone(),
            })
        }
    }
}

/// Parse a string as a decimal number, or `None` if it is not one.
///
/// Surrounding ASCII whitespace is ignored. The rest must be an optional
/// sign, digits with an optional fraction (or a bare fraction such as
/// `.5`), and an optional exponent. Anything else, including `inf`, `NaN`,
/// hex literals and digit separators, is rejected.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let trimmed = input.trim_matches(|c: char| c.is_ascii_whitespace());
    let bytes = trimmed.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if frac_digits == 0 {
            return None;
        }
        pos += 1 + frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return None;
        }
        pos += exp_digits;
    }

    if pos != bytes.len() {
        return None;
    }

    trimmed.parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
