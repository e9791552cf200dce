//! Raw submitted values and cast field values

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Separator used when sending multi-select values to the booking API
pub const MULTI_SEPARATOR: &str = ", ";

/// Wire format for date values
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wire format for time and duration values
pub const TIME_FORMAT: &str = "%H:%M";

/// Wire format for times submitted with seconds
pub const TIME_WITH_SECONDS_FORMAT: &str = "%H:%M:%S";

/// A value as submitted by the patient, before casting.
///
/// Deserialization never fails: lists keep only their string items and
/// anything else lands in `Other`, which casts to unset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(#[serde(deserialize_with = "string_items")] Vec<String>),
    Other(Value),
}

fn string_items<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Bool(value)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(values: Vec<&str>) -> Self {
        RawValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Submitted values keyed by attribute key
pub type Submission = HashMap<String, RawValue>;

/// A field value after casting to its declared type.
///
/// Casting never fails: anything that does not fit the type becomes `Unset`,
/// exactly like a value that was never submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Unset,
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Options chosen in a multi-select, in allowed-values order
    Selection(Vec<String>),
}

impl FieldValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Unset)
    }

    /// Whether the value counts as missing for a presence check
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Unset => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Selection(options) => options.is_empty(),
            FieldValue::Boolean(_) | FieldValue::Date(_) | FieldValue::Time(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            FieldValue::Selection(options) => Some(options),
            _ => None,
        }
    }

    /// Render the value the way the booking API expects it
    pub fn to_wire(&self) -> Value {
        match self {
            FieldValue::Unset => Value::Null,
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            FieldValue::Time(t) => {
                let format = if t.second() == 0 {
                    TIME_FORMAT
                } else {
                    TIME_WITH_SECONDS_FORMAT
                };
                Value::String(t.format(format).to_string())
            }
            FieldValue::Selection(options) => Value::String(options.join(MULTI_SEPARATOR)),
        }
    }
}
