//! Error types for custom field schemas

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised while authoring a custom field schema.
///
/// Validation of building values never produces one of these; see
/// [`crate::ValidationResult`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldsError {
    /// The schema (or one of its descriptors) is not self-consistent
    #[error("malformed schema: {reason}")]
    MalformedSchema { reason: String },
}

impl FieldsError {
    /// Create a malformed schema error with a free-form reason
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            reason: reason.into(),
        }
    }

    /// Two descriptors declare the same key
    pub fn duplicate_key(key: &str) -> Self {
        Self::malformed(format!("duplicate field key: {key}"))
    }

    /// An enum descriptor has nothing to choose from
    pub fn empty_options(key: &str) -> Self {
        Self::malformed(format!("enum field '{key}' requires at least one option"))
    }

    /// The human readable reason, without the error prefix
    pub fn reason(&self) -> &str {
        match self {
            Self::MalformedSchema { reason } => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::duplicate_key("units");
        assert_eq!(err.to_string(), "malformed schema: duplicate field key: units");
    }

    #[test]
    fn test_reason_strips_prefix() {
        let err = FieldsError::empty_options("color");
        assert_eq!(err.reason(), "enum field 'color' requires at least one option");
    }
}
