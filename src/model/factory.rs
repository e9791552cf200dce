//! Memoizing factory for form models

use super::descriptor::FormModelDescriptor;
use crate::schema::FormSchema;
use dashmap::DashMap;
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<ModelFactory> = LazyLock::new(ModelFactory::new);

/// Builds form models, one per distinct comment form.
///
/// Models are keyed by the structural value of the schema, so the same form
/// fetched twice resolves to the same model. Entries are never evicted; the
/// number of distinct forms is bounded by the configured event types.
#[derive(Debug, Default)]
pub struct ModelFactory {
    cache: DashMap<FormSchema, Arc<FormModelDescriptor>>,
}

impl ModelFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide factory
    pub fn global() -> &'static ModelFactory {
        &GLOBAL
    }

    /// Return the model for `schema`, building it on first use.
    ///
    /// The model is derived outside of any lock. When two threads race on the
    /// same schema, the first inserted model wins and both get it.
    pub fn build(&self, schema: &FormSchema) -> Arc<FormModelDescriptor> {
        if let Some(hit) = self.cache.get(schema) {
            tracing::trace!("Form model cache hit for event type {}", schema.event_type_id());
            return Arc::clone(hit.value());
        }

        let built = Arc::new(FormModelDescriptor::build(schema));
        tracing::debug!(
            "Built form model for event type {} with {} attributes",
            schema.event_type_id(),
            built.len()
        );

        let entry = self.cache.entry(schema.clone()).or_insert(built);
        Arc::clone(entry.value())
    }

    /// Number of cached models
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
