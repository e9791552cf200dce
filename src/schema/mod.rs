//! Comment form schema layer
//!
//! Value objects describing the structured comment form an event type
//! declares, and the parser that builds them from booking API data.

mod field;
mod form;
mod parser;

pub use field::{DateRestriction, FieldConfiguration, FieldKind, FieldSchema};
pub use form::{EventType, EventTypeId, FormSchema};
pub use parser::{DuplicateKeyPolicy, SchemaParser};
