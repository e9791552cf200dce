//! Loads event types and their form models through a schema source

use super::traits::SchemaSource;
use crate::model::{FormModelDescriptor, ModelFactory};
use crate::schema::{EventType, EventTypeId, SchemaParser};
use anyhow::{Context, Result};
use std::sync::Arc;

/// An event type together with the model for its comment form
#[derive(Debug, Clone)]
pub struct LoadedEventType {
    pub event_type: EventType,
    pub model: Arc<FormModelDescriptor>,
}

/// Fetches event types and resolves their comment form models
pub struct CommentForms<'f, S: SchemaSource> {
    source: S,
    parser: SchemaParser,
    factory: &'f ModelFactory,
}

impl<S: SchemaSource> CommentForms<'static, S> {
    /// Service backed by the process-wide model factory
    pub fn new(source: S, parser: SchemaParser) -> Self {
        Self::with_factory(source, parser, ModelFactory::global())
    }
}

impl<'f, S: SchemaSource> CommentForms<'f, S> {
    pub fn with_factory(source: S, parser: SchemaParser, factory: &'f ModelFactory) -> Self {
        Self {
            source,
            parser,
            factory,
        }
    }

    pub async fn load(&self, event_type_id: EventTypeId) -> Result<LoadedEventType> {
        let raw = self.source.fetch_event_type(event_type_id).await?;
        let event_type = self
            .parser
            .parse_event_type(&raw)
            .with_context(|| format!("Event type {event_type_id} has an unusable comment form"))?;

        if event_type.id != event_type_id {
            tracing::warn!(
                "Requested event type {event_type_id} but source returned {}",
                event_type.id
            );
        }

        let model = self.factory.build(&event_type.comment_form);
        Ok(LoadedEventType { event_type, model })
    }
}
