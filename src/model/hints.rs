//! Rendering hints for the presentation layer

use super::attribute::{AttributeDescriptor, ValueType};
use super::descriptor::FormModelDescriptor;
use crate::schema::{DateRestriction, FieldKind, FieldSchema};
use serde::Serialize;

/// Input widget a field should be rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    String,
    Text,
    Date,
    Time,
    Select,
    CheckBoxes,
    RadioButtons,
}

/// One selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub value: serde_json::Value,
}

impl Choice {
    fn text(option: &str) -> Self {
        Self {
            label: option.to_string(),
            value: serde_json::Value::String(option.to_string()),
        }
    }

    fn boolean(label: &str, value: bool) -> Self {
        Self {
            label: label.to_string(),
            value: serde_json::Value::Bool(value),
        }
    }
}

/// Everything a form renderer needs to know about one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputHints {
    pub key: String,
    pub label: String,
    pub input: InputKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collection: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Use the browser's native picker
    pub html5: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restriction: Option<DateRestriction>,
}

impl InputHints {
    pub fn for_attribute(attribute: &AttributeDescriptor, field: &FieldSchema) -> Self {
        let kind = field.kind();
        let input = match (&attribute.value_type, kind) {
            (ValueType::Boolean, _) => InputKind::RadioButtons,
            (ValueType::EnumMulti(_), _) => InputKind::CheckBoxes,
            (ValueType::EnumSingle(_), _) => InputKind::Select,
            (ValueType::Date, _) => InputKind::Date,
            (ValueType::Time, _) => InputKind::Time,
            (ValueType::String, FieldKind::MultilineText) => InputKind::Text,
            (ValueType::String, _) => InputKind::String,
        };

        let collection = match &attribute.value_type {
            ValueType::Boolean => vec![Choice::boolean("Yes", true), Choice::boolean("No", false)],
            ValueType::EnumSingle(options) | ValueType::EnumMulti(options) => {
                options.iter().map(|option| Choice::text(option)).collect()
            }
            _ => Vec::new(),
        };

        Self {
            key: attribute.key.clone(),
            label: field.name.clone(),
            input,
            required: attribute.is_required(),
            collection,
            placeholder: field.config.placeholder.clone(),
            html5: matches!(input, InputKind::Date | InputKind::Time),
            restriction: match input {
                InputKind::Date => field.config.restriction,
                _ => None,
            },
        }
    }

    /// Hints for every attribute of a model, in field order
    pub fn for_model(descriptor: &FormModelDescriptor) -> Vec<Self> {
        descriptor
            .entries()
            .map(|(attribute, field)| Self::for_attribute(attribute, field))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldConfiguration;
    use pretty_assertions::assert_eq;

    fn hints(field_type: &str, required: bool, config: FieldConfiguration) -> InputHints {
        let field = FieldSchema::new("Foo Bär", required, field_type, config);
        InputHints::for_attribute(&AttributeDescriptor::derive(&field), &field)
    }

    #[test]
    fn test_text_fields() {
        let textfield = hints("textfield", true, FieldConfiguration::new());
        assert_eq!(textfield.input, InputKind::String);
        assert_eq!(textfield.label, "Foo Bär");
        assert_eq!(textfield.key, "foo_bär");
        assert!(!textfield.html5);

        assert_eq!(hints("textarea", true, FieldConfiguration::new()).input, InputKind::Text);
    }

    #[test]
    fn test_date_and_time_fields_use_html5_pickers() {
        let date = hints(
            "date",
            true,
            FieldConfiguration::new().with_restriction(DateRestriction::Past),
        );
        assert_eq!(date.input, InputKind::Date);
        assert!(date.html5);
        assert_eq!(date.restriction, Some(DateRestriction::Past));

        for field_type in ["time", "duration"] {
            let time = hints(field_type, true, FieldConfiguration::new());
            assert_eq!(time.input, InputKind::Time);
            assert!(time.html5);
        }
    }

    #[test]
    fn test_combo_fields() {
        let config = FieldConfiguration::new()
            .with_allowed_values(["Yes", "No", "Maybe"])
            .with_placeholder("Pick carefully");

        let single = hints("combo", true, config.clone());
        assert_eq!(single.input, InputKind::Select);
        let labels: Vec<&str> = single.collection.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Yes", "No", "Maybe"]);

        assert_eq!(hints("combo", true, config.multi()).input, InputKind::CheckBoxes);
    }

    #[test]
    fn test_checkbox_renders_as_yes_no_radio_buttons() {
        for required in [true, false] {
            let checkbox = hints("checkbox", required, FieldConfiguration::new());
            assert_eq!(checkbox.input, InputKind::RadioButtons);
            assert_eq!(checkbox.required, required);
            assert_eq!(
                checkbox.collection,
                vec![Choice::boolean("Yes", true), Choice::boolean("No", false)]
            );
        }
    }

    #[test]
    fn test_unknown_type_renders_as_string_with_placeholder() {
        let other = hints(
            "foobar",
            true,
            FieldConfiguration::new().with_placeholder("foo bar, baz?"),
        );
        assert_eq!(other.input, InputKind::String);
        assert_eq!(other.placeholder.as_deref(), Some("foo bar, baz?"));
    }
}
