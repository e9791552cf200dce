//! Form instances: cast, validate and serialize submitted comment values

use super::attribute::ValidationRule;
use super::descriptor::FormModelDescriptor;
use super::value::{FieldValue, RawValue, Submission};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Where a validation failure belongs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "scope", content = "key")]
pub enum FailureKey {
    Attribute(String),
    /// Not tied to one attribute
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Missing, or submitted but not castable
    Blank,
    /// Checkbox was neither ticked nor explicitly unticked
    NotAccepted,
    CommentFormInvalid,
}

impl FailureKind {
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::Blank => "can't be blank",
            FailureKind::NotAccepted => "must be accepted",
            FailureKind::CommentFormInvalid => "comment form is not valid",
        }
    }
}

/// A user-correctable problem with submitted values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub key: FailureKey,
    pub kind: FailureKind,
    /// Human label, the original field name for attributes
    pub label: String,
}

impl ValidationFailure {
    pub fn attribute(key: impl Into<String>, label: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            key: FailureKey::Attribute(key.into()),
            kind,
            label: label.into(),
        }
    }

    pub fn form(label: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            key: FailureKey::Form,
            kind,
            label: label.into(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, self.kind.message())
    }
}

/// Structured comment payload for the booking API.
///
/// Every declared field appears, in declaration order, under its original
/// name. Serializes as a JSON object keeping that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructuredComment {
    entries: Vec<(String, Value)>,
}

impl StructuredComment {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for StructuredComment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Values of one comment form submission
#[derive(Debug, Clone)]
pub struct FormInstance {
    descriptor: Arc<FormModelDescriptor>,
    /// One slot per attribute, in attribute order
    values: Vec<FieldValue>,
}

impl FormInstance {
    /// Cast every submitted value the model knows about.
    ///
    /// Keys without an attribute are ignored; attributes without a
    /// submitted value, or with one that does not cast, stay unset.
    pub fn new(descriptor: Arc<FormModelDescriptor>, raw_values: &Submission) -> Self {
        let values = descriptor
            .attributes()
            .iter()
            .map(|attribute| {
                raw_values
                    .get(&attribute.key)
                    .map_or(FieldValue::Unset, |raw| attribute.value_type.cast(raw))
            })
            .collect();

        Self { descriptor, values }
    }

    /// An instance with every attribute unset
    pub fn blank(descriptor: Arc<FormModelDescriptor>) -> Self {
        Self::new(descriptor, &Submission::new())
    }

    pub fn descriptor(&self) -> &Arc<FormModelDescriptor> {
        &self.descriptor
    }

    /// Cast value of an attribute, `None` for unknown keys
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.position(key).map(|index| &self.values[index])
    }

    /// Cast and store a raw value. Returns false for unknown keys.
    pub fn set(&mut self, key: &str, raw: impl Into<RawValue>) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        let raw = raw.into();
        self.values[index] = self.descriptor.attributes()[index].value_type.cast(&raw);
        true
    }

    /// Failures in attribute order; empty when the instance is valid
    pub fn validate(&self) -> Vec<ValidationFailure> {
        self.descriptor
            .attributes()
            .iter()
            .zip(&self.values)
            .filter(|(attribute, value)| !attribute.validation.check(value))
            .map(|(attribute, _)| {
                let kind = match attribute.validation {
                    ValidationRule::CheckboxAcceptance => FailureKind::NotAccepted,
                    ValidationRule::Presence | ValidationRule::None => FailureKind::Blank,
                };
                let label = self
                    .descriptor
                    .field(&attribute.key)
                    .map_or(attribute.key.as_str(), |field| field.name.as_str());
                ValidationFailure::attribute(attribute.key.clone(), label, kind)
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Values keyed by original field name, ready for the booking API
    pub fn serialize(&self) -> StructuredComment {
        let entries = self
            .descriptor
            .entries()
            .zip(&self.values)
            .map(|((_, field), value)| (field.name.clone(), value.to_wire()))
            .collect();

        StructuredComment { entries }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.descriptor
            .attributes()
            .iter()
            .position(|attribute| attribute.key == key)
    }
}
