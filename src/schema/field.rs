//! Comment form field value objects

use serde::Serialize;

/// Restriction applied to a date picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRestriction {
    Past,
    Future,
}

impl DateRestriction {
    /// Parse the API token, `None` for anything unknown
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "past" => Some(Self::Past),
            "future" => Some(Self::Future),
            _ => None,
        }
    }
}

/// Known field types, classified from the raw type tag.
///
/// The booking API sends `textfield`, `textarea`, `date`, `time`, `duration`,
/// `combo` and `checkbox`. Anything else is still a valid field and is
/// treated as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    MultilineText,
    Date,
    Time,
    Duration,
    Select,
    Checkbox,
    Other,
}

impl FieldKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "textfield" | "text" => Self::Text,
            "textarea" | "multiline-text" => Self::MultilineText,
            "date" => Self::Date,
            "time" => Self::Time,
            "duration" => Self::Duration,
            "combo" | "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            _ => Self::Other,
        }
    }
}

/// Auxiliary constraints for a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldConfiguration {
    pub restriction: Option<DateRestriction>,
    /// Valid options for a select field, order matters
    pub allowed_values: Option<Vec<String>>,
    pub placeholder: Option<String>,
    pub multi_select: bool,
}

impl FieldConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_restriction(mut self, restriction: DateRestriction) -> Self {
        self.restriction = Some(restriction);
        self
    }

    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn multi(mut self) -> Self {
        self.multi_select = true;
        self
    }

    /// Allowed options, empty when none were declared
    pub fn options(&self) -> &[String] {
        self.allowed_values.as_deref().unwrap_or_default()
    }
}

/// One field of an event type's comment form.
///
/// `name` is both the label shown to the patient and the key under which the
/// value is sent back when booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSchema {
    pub name: String,
    pub required: bool,
    pub field_type: String,
    pub config: FieldConfiguration,
}

impl FieldSchema {
    pub fn new(
        name: impl Into<String>,
        required: bool,
        field_type: impl Into<String>,
        config: FieldConfiguration,
    ) -> Self {
        Self {
            name: name.into(),
            required,
            field_type: field_type.into(),
            config,
        }
    }

    pub fn kind(&self) -> FieldKind {
        FieldKind::from_tag(&self.field_type)
    }
}
