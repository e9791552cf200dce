//! Trait abstraction for the remote schema source to enable mocking in tests

use crate::schema::EventTypeId;
use anyhow::Result;
use async_trait::async_trait;

/// Anything that can hand out raw event type data, comment form included
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Raw event type mapping as returned by the booking API
    async fn fetch_event_type(&self, event_type_id: EventTypeId) -> Result<serde_json::Value>;
}
