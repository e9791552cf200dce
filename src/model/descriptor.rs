//! Form model descriptors

use super::attribute::AttributeDescriptor;
use crate::schema::{EventTypeId, FieldSchema, FormSchema};
use std::collections::HashMap;

/// The typed model derived from one [`FormSchema`].
///
/// Holds the attributes in field order and maps every attribute key back to
/// the field it came from, so values can be sent under the original name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModelDescriptor {
    event_type_id: EventTypeId,
    attributes: Vec<AttributeDescriptor>,
    fields: HashMap<String, FieldSchema>,
}

impl FormModelDescriptor {
    /// Derive the model for a schema.
    ///
    /// Attribute keys are unique within a model: a field whose key is already
    /// taken gets the first free `_2`, `_3`, ... suffix.
    pub fn build(schema: &FormSchema) -> Self {
        let mut attributes = Vec::with_capacity(schema.fields().len());
        let mut fields = HashMap::with_capacity(schema.fields().len());

        for field in schema.fields() {
            let mut attribute = AttributeDescriptor::derive(field);
            if fields.contains_key(&attribute.key) {
                let base = attribute.key.clone();
                let mut n = 2;
                while fields.contains_key(&format!("{base}_{n}")) {
                    n += 1;
                }
                attribute.key = format!("{base}_{n}");
                tracing::warn!(
                    "Field {:?} of event type {} renamed to attribute {:?}",
                    field.name,
                    schema.event_type_id(),
                    attribute.key
                );
            }
            fields.insert(attribute.key.clone(), field.clone());
            attributes.push(attribute);
        }

        Self {
            event_type_id: schema.event_type_id(),
            attributes,
            fields,
        }
    }

    pub fn event_type_id(&self) -> EventTypeId {
        self.event_type_id
    }

    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|attribute| attribute.key == key)
    }

    /// The field an attribute was derived from
    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.get(key)
    }

    /// Attributes paired with their fields, in declaration order
    pub fn entries(&self) -> impl Iterator<Item = (&AttributeDescriptor, &FieldSchema)> {
        self.attributes
            .iter()
            .filter_map(|attribute| self.fields.get(&attribute.key).map(|field| (attribute, field)))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
