// File: src/forms/mod.rs
// Purpose: Form field model, events, and the two form controllers

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod manual;
pub mod schema;
pub mod validated;
pub mod values;

pub use manual::ManualForm;
pub use schema::{sample_schema, ErrorMap, FieldRules, Rule, ValidationSchema};
pub use validated::{SubmitOutcome, ValidatedForm, ValidationMode};
pub use values::{FormValues, GenderCode};

/// A field of the sample form, named by its wire (HTML `name`) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "username")]
    Username,
    #[serde(rename = "zipcode")]
    Zipcode,
    #[serde(rename = "gender")]
    Gender,
    #[serde(rename = "isAgreed")]
    IsAgreed,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Username, Field::Zipcode, Field::Gender, Field::IsAgreed];

    /// The `name` attribute used in forms and JSON bodies
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Zipcode => "zipcode",
            Field::Gender => "gender",
            Field::IsAgreed => "isAgreed",
        }
    }

    /// Look up a field by its `name` attribute
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Whether the field is rendered as a checkbox
    pub fn is_checkbox(self) -> bool {
        matches!(self, Field::IsAgreed)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// New value carried by a change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text input or select value
    Text(String),
    /// Checkbox state
    Checked(bool),
}

impl FieldValue {
    /// Whether the value counts as "not provided" for optional fields
    pub fn is_absent(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Checked(_) => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Checked(b)
    }
}

/// Dispatch flags of a submit or reset event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormEvent {
    default_prevented: bool,
    propagation_stopped: bool,
}

impl FormEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the browser's default action (navigation on submit)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Keep the event from reaching ancestor handlers
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
        assert_eq!(Field::from_name("isagreed"), None);
        assert_eq!(Field::from_name("email"), None);
    }

    #[test]
    fn test_field_serializes_as_wire_name() {
        let json = serde_json::to_string(&Field::IsAgreed).unwrap();
        assert_eq!(json, "\"isAgreed\"");
    }

    #[test]
    fn test_field_value_absence() {
        assert!(FieldValue::from("").is_absent());
        assert!(!FieldValue::from("x").is_absent());
        assert!(!FieldValue::from(false).is_absent());
    }

    #[test]
    fn test_form_event_flags() {
        let mut event = FormEvent::new();
        assert!(!event.default_prevented());
        assert!(!event.propagation_stopped());

        event.prevent_default();
        assert!(event.default_prevented());
        assert!(!event.propagation_stopped());

        event.stop_propagation();
        assert!(event.propagation_stopped());
    }
}
