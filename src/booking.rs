//! Booking request composition and booking API error mapping
//!
//! The HTTP exchange itself lives outside this crate; this module shapes the
//! request body, including the structured comment, and turns API responses
//! into typed results.

use crate::model::{FailureKind, FormInstance, StructuredComment, ValidationFailure};
use crate::schema::EventTypeId;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const EVENT_UNAVAILABLE: &str = "The event is unavailable.";
const ATTENDANT_BLOCKED: &str = "attendant_blocked";

/// A bookable slot as offered by the booking API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeslot {
    pub institution_id: String,
    pub event_category_id: i64,
    pub event_type_id: EventTypeId,
    pub starts_at: DateTime<FixedOffset>,
    pub token: String,
}

/// Values needed to book an event
#[derive(Debug, Clone, Default)]
pub struct BookingDetails {
    pub institution_id: Option<String>,
    pub event_category_id: Option<i64>,
    pub event_type_id: Option<EventTypeId>,
    pub starts_at: Option<DateTime<FixedOffset>>,
    pub token: Option<String>,
    pub comment_form: Option<FormInstance>,
}

impl BookingDetails {
    /// Prefill the details from a timeslot
    pub fn from_timeslot(timeslot: &Timeslot, comment_form: Option<FormInstance>) -> Self {
        Self {
            institution_id: Some(timeslot.institution_id.clone()),
            event_category_id: Some(timeslot.event_category_id),
            event_type_id: Some(timeslot.event_type_id),
            starts_at: Some(timeslot.starts_at),
            token: Some(timeslot.token.clone()),
            comment_form,
        }
    }

    pub fn validate(&self) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        if self.event_category_id.is_none() {
            failures.push(blank("event_category_id", "Event category"));
        }
        if self.event_type_id.is_none() {
            failures.push(blank("event_type_id", "Event type"));
        }
        if self.starts_at.is_none() {
            failures.push(blank("starts_at", "Start"));
        }
        if self.token.as_deref().map_or(true, |token| token.trim().is_empty()) {
            failures.push(blank("token", "Token"));
        }
        if self.comment_form.as_ref().is_some_and(|form| !form.is_valid()) {
            failures.push(ValidationFailure::form(
                "Comment form",
                FailureKind::CommentFormInvalid,
            ));
        }

        failures
    }

    /// Structured comment values, `None` when there is no comment form
    pub fn structured_comment(&self) -> Option<StructuredComment> {
        self.comment_form.as_ref().map(FormInstance::serialize)
    }

    /// Validate and build the body for the booking API
    pub fn request(&self) -> Result<BookingRequest, Vec<ValidationFailure>> {
        let failures = self.validate();

        match (self.event_category_id, self.event_type_id, self.starts_at, &self.token) {
            (Some(event_category_id), Some(event_type_id), Some(starts_at), Some(token))
                if failures.is_empty() =>
            {
                Ok(BookingRequest {
                    event_category_id,
                    event_type_id,
                    starts_at: starts_at.to_rfc3339_opts(SecondsFormat::Secs, false),
                    token: token.clone(),
                    structured_comment: self.structured_comment(),
                })
            }
            _ => Err(failures),
        }
    }
}

fn blank(key: &str, label: &str) -> ValidationFailure {
    ValidationFailure::attribute(key, label, FailureKind::Blank)
}

/// Body of a booking request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    pub event_category_id: i64,
    pub event_type_id: EventTypeId,
    pub starts_at: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_comment: Option<StructuredComment>,
}

/// Successful booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingConfirmation {
    pub id: String,
}

impl BookingConfirmation {
    pub fn from_body(body: &Value) -> Result<Self, BookingApiError> {
        let id = match body.pointer("/data/id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => return Err(BookingApiError::Api("Missing booking id in response".to_string())),
        };
        Ok(Self { id })
    }
}

/// Errors returned by the booking API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingApiError {
    /// The timeslot is taken or no longer valid
    #[error("{0}")]
    EventUnavailable(String),

    #[error("event type or category not found")]
    EventTypeOrCategoryNotFound,

    #[error("booking not allowed with current insurance settings")]
    ForbiddenWithCurrentInsuranceSettings,

    /// The API rejected the structured comment
    #[error("{reason}")]
    CommentFormValidation { reason: String, errors: Value },

    #[error("{0}")]
    Api(String),
}

impl BookingApiError {
    /// Map a non-success response to an error
    pub fn from_response(status: u16, body: &Value) -> Self {
        match status {
            400 => Self::from_bad_request(body),
            403 => Self::ForbiddenWithCurrentInsuranceSettings,
            404 => Self::EventTypeOrCategoryNotFound,
            422 => Self::from_unprocessable(body),
            _ => Self::Api(format!("Received status {status}")),
        }
    }

    fn from_bad_request(body: &Value) -> Self {
        let Some(error) = body
            .get("error")
            .or_else(|| body.get("reason"))
            .and_then(Value::as_str)
        else {
            return Self::Api("Unknown 400 error".to_string());
        };

        match error {
            EVENT_UNAVAILABLE => Self::EventUnavailable(error.to_string()),
            ATTENDANT_BLOCKED => {
                let overridable = body
                    .get("overridable")
                    .map_or_else(|| "unknown".to_string(), Value::to_string);
                Self::Api(format!("Attendant blocked. Overridable: {overridable}"))
            }
            other => Self::Api(other.to_string()),
        }
    }

    fn from_unprocessable(body: &Value) -> Self {
        match (
            body.get("reason").and_then(Value::as_str),
            body.get("invalid_fields"),
        ) {
            (Some(reason), Some(errors)) => Self::CommentFormValidation {
                reason: reason.to_string(),
                errors: errors.clone(),
            },
            _ => Self::Api("Unknown 422 error".to_string()),
        }
    }
}
