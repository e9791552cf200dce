//! Attribute derivation for comment form fields
//!
//! Every field of a comment form becomes one attribute of the form model: a
//! machine-safe key, the type submitted values are cast to, and the
//! validation applied to the cast value. All of it is derived from the
//! [`FieldSchema`] alone.

use super::value::{FieldValue, RawValue};
use crate::schema::{FieldKind, FieldSchema};
use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static NON_ALNUM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{Alphabetic}\p{M}\p{Nd}]+").unwrap());

/// Text values the booking form uses for an unticked checkbox
const FALSE_VALUES: &[&str] = &["0", "f", "F", "false", "FALSE", "off", "OFF"];

/// Lower-case a field name and collapse every run of non-alphanumeric
/// characters into a single underscore
pub fn slugify(name: &str) -> String {
    NON_ALNUM_RE.replace_all(&name.to_lowercase(), "_").into_owned()
}

/// Type a submitted value is cast to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum ValueType {
    String,
    Boolean,
    Date,
    Time,
    EnumSingle(Vec<String>),
    EnumMulti(Vec<String>),
}

impl ValueType {
    fn for_field(field: &FieldSchema) -> Self {
        match field.kind() {
            FieldKind::Checkbox => Self::Boolean,
            FieldKind::Date => Self::Date,
            FieldKind::Time | FieldKind::Duration => Self::Time,
            FieldKind::Select => {
                let options = field.config.options().to_vec();
                if field.config.multi_select {
                    Self::EnumMulti(options)
                } else {
                    Self::EnumSingle(options)
                }
            }
            FieldKind::Text | FieldKind::MultilineText | FieldKind::Other => Self::String,
        }
    }

    /// Allowed options for enum types
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::EnumSingle(options) | Self::EnumMulti(options) => Some(options),
            _ => None,
        }
    }

    /// Cast a raw submitted value, degrading to `Unset` when it does not fit
    pub fn cast(&self, raw: &RawValue) -> FieldValue {
        if matches!(raw, RawValue::Null) {
            return FieldValue::Unset;
        }

        match self {
            Self::String => cast_string(raw),
            Self::Boolean => cast_boolean(raw),
            Self::Date => cast_date(raw),
            Self::Time => cast_time(raw),
            Self::EnumSingle(options) => match raw {
                RawValue::Text(s) if options.contains(s) => FieldValue::Text(s.clone()),
                _ => FieldValue::Unset,
            },
            Self::EnumMulti(options) => {
                let submitted: &[String] = match raw {
                    RawValue::Text(s) => std::slice::from_ref(s),
                    RawValue::List(list) => list,
                    _ => return FieldValue::Unset,
                };
                let mut selected: Vec<String> = Vec::new();
                for option in options {
                    if submitted.contains(option) && !selected.contains(option) {
                        selected.push(option.clone());
                    }
                }
                FieldValue::Selection(selected)
            }
        }
    }
}

fn cast_string(raw: &RawValue) -> FieldValue {
    match raw {
        RawValue::Text(s) => FieldValue::Text(s.clone()),
        RawValue::Number(n) => FieldValue::Text(n.to_string()),
        RawValue::Bool(b) => FieldValue::Text(b.to_string()),
        RawValue::Null | RawValue::List(_) | RawValue::Other(_) => FieldValue::Unset,
    }
}

fn cast_boolean(raw: &RawValue) -> FieldValue {
    match raw {
        RawValue::Bool(b) => FieldValue::Boolean(*b),
        RawValue::Text(s) if s.is_empty() => FieldValue::Unset,
        RawValue::Text(s) => FieldValue::Boolean(!FALSE_VALUES.contains(&s.as_str())),
        RawValue::Number(n) => FieldValue::Boolean(n.as_f64() != Some(0.0)),
        RawValue::Null | RawValue::List(_) | RawValue::Other(_) => FieldValue::Unset,
    }
}

fn cast_date(raw: &RawValue) -> FieldValue {
    let RawValue::Text(s) = raw else {
        return FieldValue::Unset;
    };
    let s = s.trim();

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .map_or(FieldValue::Unset, FieldValue::Date)
}

fn cast_time(raw: &RawValue) -> FieldValue {
    let RawValue::Text(s) = raw else {
        return FieldValue::Unset;
    };
    let s = s.trim();

    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.time()))
        .map_or(FieldValue::Unset, FieldValue::Time)
}

/// Validation applied to a cast value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    None,
    /// Value must be non-blank
    Presence,
    /// Value must be an explicit `true` or `false`
    CheckboxAcceptance,
}

impl ValidationRule {
    fn for_field(field: &FieldSchema) -> Self {
        if !field.required {
            return Self::None;
        }
        match field.kind() {
            FieldKind::Checkbox => Self::CheckboxAcceptance,
            _ => Self::Presence,
        }
    }

    /// Whether `value` satisfies the rule
    pub fn check(&self, value: &FieldValue) -> bool {
        match self {
            Self::None => true,
            Self::Presence => !value.is_blank(),
            Self::CheckboxAcceptance => value.as_bool().is_some(),
        }
    }
}

/// One attribute of a form model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDescriptor {
    pub key: String,
    pub value_type: ValueType,
    pub validation: ValidationRule,
}

impl AttributeDescriptor {
    pub fn derive(field: &FieldSchema) -> Self {
        Self {
            key: slugify(&field.name),
            value_type: ValueType::for_field(field),
            validation: ValidationRule::for_field(field),
        }
    }

    pub fn is_required(&self) -> bool {
        self.validation != ValidationRule::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldConfiguration;
    use pretty_assertions::assert_eq;

    fn field(field_type: &str, required: bool, config: FieldConfiguration) -> FieldSchema {
        FieldSchema::new("Foo Bar", required, field_type, config)
    }

    fn options() -> Vec<String> {
        vec!["foo".to_string(), "bar".to_string(), "baz".to_string()]
    }

    mod slug {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_slug_keeps_unicode_letters() {
            assert_eq!(slugify("Foo Bar Bäß"), "foo_bar_bäß");
        }

        #[test]
        fn test_slug_collapses_runs() {
            assert_eq!(slugify("Wann beginnt die Reise?"), "wann_beginnt_die_reise_");
            assert_eq!(slugify("foo - / bar"), "foo_bar");
            assert_eq!(slugify("Dosis (mg) 2x"), "dosis_mg_2x");
        }

        #[test]
        fn test_slug_keeps_combining_marks() {
            assert_eq!(slugify("Cafe\u{301} Name"), "cafe\u{301}_name");
            assert_ne!(slugify("Cafe\u{301} Name"), slugify("Cafe Name"));
        }

        #[test]
        fn test_slug_of_differently_written_names_can_collide() {
            assert_eq!(slugify("Foo Bar"), slugify("foo-bar"));
        }
    }

    mod value_type {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_value_type_per_kind() {
            let none = FieldConfiguration::new;
            assert_eq!(ValueType::for_field(&field("checkbox", false, none())), ValueType::Boolean);
            assert_eq!(ValueType::for_field(&field("date", false, none())), ValueType::Date);
            assert_eq!(ValueType::for_field(&field("time", false, none())), ValueType::Time);
            assert_eq!(ValueType::for_field(&field("duration", false, none())), ValueType::Time);
            assert_eq!(ValueType::for_field(&field("text", false, none())), ValueType::String);
            assert_eq!(ValueType::for_field(&field("textarea", false, none())), ValueType::String);
            assert_eq!(ValueType::for_field(&field("foobar", false, none())), ValueType::String);
        }

        #[test]
        fn test_combo_is_single_or_multi_enum() {
            let single = field("combo", false, FieldConfiguration::new().with_allowed_values(options()));
            assert_eq!(ValueType::for_field(&single), ValueType::EnumSingle(options()));

            let multi = field(
                "combo",
                false,
                FieldConfiguration::new().with_allowed_values(options()).multi(),
            );
            assert_eq!(ValueType::for_field(&multi), ValueType::EnumMulti(options()));
        }
    }

    mod casting {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_single_select_accepts_only_allowed_values() {
            let value_type = ValueType::EnumSingle(options());
            assert_eq!(value_type.cast(&"abc".into()), FieldValue::Unset);
            assert_eq!(value_type.cast(&"bar".into()), FieldValue::Text("bar".to_string()));
            assert_eq!(value_type.cast(&vec!["bar"].into()), FieldValue::Unset);
        }

        #[test]
        fn test_multi_select_drops_unknown_options() {
            let value_type = ValueType::EnumMulti(options());
            assert_eq!(
                value_type.cast(&vec!["foo", "def", "bar"].into()),
                FieldValue::Selection(vec!["foo".to_string(), "bar".to_string()])
            );
        }

        #[test]
        fn test_multi_select_follows_allowed_order_without_duplicates() {
            let value_type = ValueType::EnumMulti(options());
            assert_eq!(
                value_type.cast(&vec!["baz", "foo", "baz"].into()),
                FieldValue::Selection(vec!["foo".to_string(), "baz".to_string()])
            );
            assert_eq!(
                value_type.cast(&"baz".into()),
                FieldValue::Selection(vec!["baz".to_string()])
            );
        }

        #[test]
        fn test_select_without_allowed_values_accepts_nothing() {
            assert_eq!(ValueType::EnumSingle(vec![]).cast(&"foo".into()), FieldValue::Unset);
        }

        #[test]
        fn test_boolean_casting() {
            let value_type = ValueType::Boolean;
            assert_eq!(value_type.cast(&true.into()), FieldValue::Boolean(true));
            assert_eq!(value_type.cast(&false.into()), FieldValue::Boolean(false));
            assert_eq!(value_type.cast(&"1".into()), FieldValue::Boolean(true));
            assert_eq!(value_type.cast(&"0".into()), FieldValue::Boolean(false));
            assert_eq!(value_type.cast(&"off".into()), FieldValue::Boolean(false));
            assert_eq!(value_type.cast(&"".into()), FieldValue::Unset);
            assert_eq!(value_type.cast(&RawValue::Null), FieldValue::Unset);
        }

        #[test]
        fn test_date_casting() {
            let value_type = ValueType::Date;
            assert_eq!(
                value_type.cast(&"2024-05-17".into()),
                FieldValue::Date(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
            );
            assert_eq!(
                value_type.cast(&"2024-05-17T10:00:00+02:00".into()),
                FieldValue::Date(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap())
            );
            assert_eq!(value_type.cast(&"2024-02-30".into()), FieldValue::Unset);
            assert_eq!(value_type.cast(&"tomorrow".into()), FieldValue::Unset);
        }

        #[test]
        fn test_time_casting() {
            let value_type = ValueType::Time;
            let half_past_ten = NaiveTime::from_hms_opt(10, 30, 0).unwrap();
            assert_eq!(value_type.cast(&"10:30".into()), FieldValue::Time(half_past_ten));
            assert_eq!(value_type.cast(&"10:30:00".into()), FieldValue::Time(half_past_ten));
            assert_eq!(value_type.cast(&"25:00".into()), FieldValue::Unset);
        }

        #[test]
        fn test_string_casting() {
            let value_type = ValueType::String;
            assert_eq!(value_type.cast(&"buzz".into()), FieldValue::Text("buzz".to_string()));
            assert_eq!(value_type.cast(&true.into()), FieldValue::Text("true".to_string()));
            assert_eq!(value_type.cast(&vec!["a"].into()), FieldValue::Unset);
        }

        #[test]
        fn test_unrecognised_values_cast_to_unset() {
            let other = RawValue::Other(serde_json::json!({ "x": 1 }));
            for value_type in [
                ValueType::String,
                ValueType::Boolean,
                ValueType::Date,
                ValueType::Time,
                ValueType::EnumSingle(options()),
                ValueType::EnumMulti(options()),
            ] {
                assert_eq!(value_type.cast(&other), FieldValue::Unset, "{value_type:?}");
            }
        }
    }

    mod validation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_optional_fields_have_no_rule() {
            let attribute = AttributeDescriptor::derive(&field("text", false, FieldConfiguration::new()));
            assert_eq!(attribute.validation, ValidationRule::None);
            assert!(!attribute.is_required());
        }

        #[test]
        fn test_required_checkbox_needs_acceptance() {
            let attribute =
                AttributeDescriptor::derive(&field("checkbox", true, FieldConfiguration::new()));
            assert_eq!(attribute.validation, ValidationRule::CheckboxAcceptance);
            assert!(attribute.is_required());
        }

        #[test]
        fn test_required_other_fields_need_presence() {
            for field_type in ["text", "textarea", "date", "time", "duration", "combo", "foobar"] {
                let attribute =
                    AttributeDescriptor::derive(&field(field_type, true, FieldConfiguration::new()));
                assert_eq!(attribute.validation, ValidationRule::Presence, "{field_type}");
            }
        }

        #[test]
        fn test_checkbox_acceptance_is_about_explicit_booleans() {
            let rule = ValidationRule::CheckboxAcceptance;
            assert!(rule.check(&FieldValue::Boolean(false)));
            assert!(rule.check(&FieldValue::Boolean(true)));
            assert!(!rule.check(&FieldValue::Unset));
        }
    }

    #[test]
    fn test_derive_key() {
        let attribute = AttributeDescriptor::derive(&FieldSchema::new(
            "Foo Bar Bäß",
            false,
            "text",
            FieldConfiguration::new(),
        ));
        assert_eq!(attribute.key, "foo_bar_bäß");
    }
}
