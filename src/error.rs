//! Errors raised while reading comment form schemas

use thiserror::Error;

/// The raw schema data handed to us by the booking API is malformed.
///
/// Not recoverable locally: the owning event type should be treated as unbookable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("missing key `{key}` in {context}")]
    MissingKey { key: &'static str, context: &'static str },

    #[error("`{key}` in {context} must be {expected}")]
    InvalidType {
        key: &'static str,
        context: &'static str,
        expected: &'static str,
    },

    #[error("comment form field name must not be empty")]
    EmptyName,

    #[error("fields `{first}` and `{second}` both map to attribute key `{key}`")]
    DuplicateAttributeKey {
        key: String,
        first: String,
        second: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message() {
        let err = SchemaError::MissingKey {
            key: "name",
            context: "comment form field",
        };
        assert_eq!(err.to_string(), "missing key `name` in comment form field");
    }

    #[test]
    fn test_duplicate_key_message_names_both_fields() {
        let err = SchemaError::DuplicateAttributeKey {
            key: "foo_bar".to_string(),
            first: "Foo Bar".to_string(),
            second: "foo-bar".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Foo Bar"));
        assert!(message.contains("foo-bar"));
        assert!(message.contains("foo_bar"));
    }
}
