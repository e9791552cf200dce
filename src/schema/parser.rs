//! Maps raw booking API data into comment form entities

use super::field::{DateRestriction, FieldConfiguration, FieldSchema};
use super::form::{EventType, EventTypeId, FormSchema};
use crate::error::SchemaError;
use crate::model::slugify;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Token the API uses to flag a multi-select combo box
const MULTI_ON: &str = "on";

const FIELD: &str = "comment form field";
const CONFIG: &str = "comment form field config";
const EVENT_TYPE: &str = "event type";

/// What to do when two field names slugify to the same attribute key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKeyPolicy {
    /// Refuse the schema
    #[default]
    Reject,
    /// Accept the schema; later duplicates get a numeric suffix
    Disambiguate,
}

/// Parser for comment form schemas coming from the booking API
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaParser {
    duplicate_keys: DuplicateKeyPolicy,
}

impl SchemaParser {
    pub fn new(duplicate_keys: DuplicateKeyPolicy) -> Self {
        Self { duplicate_keys }
    }

    pub fn duplicate_key_policy(&self) -> DuplicateKeyPolicy {
        self.duplicate_keys
    }

    /// Map a single field mapping into a [`FieldSchema`]
    pub fn parse_field(&self, raw: &Value) -> Result<FieldSchema, SchemaError> {
        let hash = as_object(raw, "field", FIELD)?;

        let name = fetch(hash, "name", FIELD)?
            .as_str()
            .ok_or(SchemaError::InvalidType {
                key: "name",
                context: FIELD,
                expected: "a string",
            })?;
        if name.is_empty() {
            return Err(SchemaError::EmptyName);
        }

        let required = fetch(hash, "required", FIELD)?
            .as_bool()
            .ok_or(SchemaError::InvalidType {
                key: "required",
                context: FIELD,
                expected: "a boolean",
            })?;

        let field_type = fetch(hash, "type", FIELD)?
            .as_str()
            .ok_or(SchemaError::InvalidType {
                key: "type",
                context: FIELD,
                expected: "a string",
            })?;

        let config = self.parse_config(hash.get("config"))?;

        Ok(FieldSchema::new(name, required, field_type, config))
    }

    /// Map a list of field mappings into a [`FormSchema`].
    ///
    /// A missing or null list means the event type needs no structured comment.
    pub fn parse_form(
        &self,
        raw: Option<&Value>,
        event_type_id: EventTypeId,
    ) -> Result<FormSchema, SchemaError> {
        let list = match raw {
            None | Some(Value::Null) => return Ok(FormSchema::empty(event_type_id)),
            Some(Value::Array(list)) => list,
            Some(_) => {
                return Err(SchemaError::InvalidType {
                    key: "comment_form",
                    context: EVENT_TYPE,
                    expected: "a list",
                })
            }
        };

        let fields = list
            .iter()
            .map(|raw_field| self.parse_field(raw_field))
            .collect::<Result<Vec<_>, _>>()?;

        if self.duplicate_keys == DuplicateKeyPolicy::Reject {
            check_unique_keys(&fields)?;
        }

        tracing::debug!(
            "Parsed comment form for event type {event_type_id} with {} fields",
            fields.len()
        );
        Ok(FormSchema::new(fields, event_type_id))
    }

    /// Map an event type mapping, including its comment form
    pub fn parse_event_type(&self, raw: &Value) -> Result<EventType, SchemaError> {
        let hash = as_object(raw, "event_type", EVENT_TYPE)?;

        let id = fetch(hash, "id", EVENT_TYPE)?
            .as_i64()
            .map(EventTypeId)
            .ok_or(SchemaError::InvalidType {
                key: "id",
                context: EVENT_TYPE,
                expected: "an integer",
            })?;

        let name = fetch(hash, "name", EVENT_TYPE)?
            .as_str()
            .ok_or(SchemaError::InvalidType {
                key: "name",
                context: EVENT_TYPE,
                expected: "a string",
            })?
            .to_string();

        let description = optional_str(hash, "description", EVENT_TYPE)?;
        let comment_form = self.parse_form(hash.get("comment_form"), id)?;

        Ok(EventType {
            id,
            name,
            description,
            comment_form,
        })
    }

    fn parse_config(&self, raw: Option<&Value>) -> Result<FieldConfiguration, SchemaError> {
        let hash = match raw {
            None | Some(Value::Null) => return Ok(FieldConfiguration::default()),
            Some(value) => as_object(value, "config", FIELD)?,
        };

        let restriction = optional_str(hash, "restriction", CONFIG)?.and_then(|token| {
            let restriction = DateRestriction::from_token(&token);
            if restriction.is_none() {
                tracing::debug!("Ignoring unknown date restriction {token:?}");
            }
            restriction
        });

        let allowed_values = optional_str(hash, "values", CONFIG)?.map(|values| split_values(&values));

        Ok(FieldConfiguration {
            restriction,
            allowed_values,
            placeholder: optional_str(hash, "emptyText", CONFIG)?,
            multi_select: hash.get("multi").and_then(Value::as_str) == Some(MULTI_ON),
        })
    }
}

fn as_object<'a>(
    raw: &'a Value,
    key: &'static str,
    context: &'static str,
) -> Result<&'a Map<String, Value>, SchemaError> {
    raw.as_object().ok_or(SchemaError::InvalidType {
        key,
        context,
        expected: "a mapping",
    })
}

fn fetch<'a>(
    hash: &'a Map<String, Value>,
    key: &'static str,
    context: &'static str,
) -> Result<&'a Value, SchemaError> {
    hash.get(key).ok_or(SchemaError::MissingKey { key, context })
}

/// A string that may be absent or null
fn optional_str(
    hash: &Map<String, Value>,
    key: &'static str,
    context: &'static str,
) -> Result<Option<String>, SchemaError> {
    match hash.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SchemaError::InvalidType {
            key,
            context,
            expected: "a string",
        }),
    }
}

/// Split newline-delimited combo values, dropping trailing blank lines
fn split_values(values: &str) -> Vec<String> {
    let mut list: Vec<String> = values
        .split('\n')
        .map(|value| value.trim_end_matches('\r').to_string())
        .collect();
    while list.last().is_some_and(|value| value.is_empty()) {
        list.pop();
    }
    list
}

fn check_unique_keys(fields: &[FieldSchema]) -> Result<(), SchemaError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for field in fields {
        let key = slugify(&field.name);
        if let Some(first) = seen.get(&key) {
            return Err(SchemaError::DuplicateAttributeKey {
                key,
                first: first.to_string(),
                second: field.name.clone(),
            });
        }
        seen.insert(key, &field.name);
    }
    Ok(())
}
