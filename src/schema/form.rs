//! Comment form and event type entities

use super::field::FieldSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an event type in the booking API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventTypeId(pub i64);

impl fmt::Display for EventTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment form belonging to an event type.
///
/// The event type id takes part in equality even though it does not change
/// the shape of the form, so two event types never share a cached model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormSchema {
    fields: Vec<FieldSchema>,
    event_type_id: EventTypeId,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSchema>, event_type_id: EventTypeId) -> Self {
        Self {
            fields,
            event_type_id,
        }
    }

    pub fn empty(event_type_id: EventTypeId) -> Self {
        Self::new(Vec::new(), event_type_id)
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn event_type_id(&self) -> EventTypeId {
        self.event_type_id
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// An event type that can be booked, with its comment form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventType {
    pub id: EventTypeId,
    pub name: String,
    pub description: Option<String>,
    pub comment_form: FormSchema,
}
