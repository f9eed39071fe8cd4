// File: src/forms/values.rs
// Purpose: Current values of the sample form

use super::{Field, FieldValue};
use crate::request_context::FormData;
use serde::{Deserialize, Deserializer, Serialize};

const CHECKBOX_ON: &str = "on";

/// Fixed set of gender category codes offered by the select box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenderCode {
    Female,
    Male,
    Other,
}

impl GenderCode {
    pub const ALL: [GenderCode; 3] = [GenderCode::Female, GenderCode::Male, GenderCode::Other];

    pub fn code(self) -> &'static str {
        match self {
            GenderCode::Female => "f",
            GenderCode::Male => "m",
            GenderCode::Other => "n",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GenderCode::Female => "Female",
            GenderCode::Male => "Male",
            GenderCode::Other => "Other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.code() == code)
    }
}

/// Values of every field in the form.
///
/// All keys are always present; optional text fields use `None` for
/// "not provided" and never hold an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub username: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub zipcode: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub gender: Option<String>,
    pub is_agreed: bool,
}

impl FormValues {
    /// Default record: empty username, nothing selected, not agreed
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a submitted body.
    ///
    /// A JSON body is deserialized as is, so `isAgreed` must be a boolean and
    /// text fields must be strings. Urlencoded fields are taken verbatim; the
    /// checkbox is checked only when the browser sent `on`, and a missing
    /// checkbox means unchecked.
    pub fn from_form(form: &FormData) -> Result<Self, serde_json::Error> {
        if let Some(json) = form.json() {
            return serde_json::from_value(json.clone());
        }

        Ok(Self {
            username: form.get("username").cloned().unwrap_or_default(),
            zipcode: form.get("zipcode").and_then(|v| non_empty(v)),
            gender: form.get("gender").and_then(|v| non_empty(v)),
            is_agreed: form.get("isAgreed").is_some_and(|v| is_checked(v)),
        })
    }

    /// Current value of a field as seen by validation rules
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::Username => FieldValue::Text(self.username.clone()),
            Field::Zipcode => FieldValue::Text(self.zipcode.clone().unwrap_or_default()),
            Field::Gender => FieldValue::Text(self.gender.clone().unwrap_or_default()),
            Field::IsAgreed => FieldValue::Checked(self.is_agreed),
        }
    }

    /// Merge a new value for one field, leaving the others untouched
    pub fn set(&mut self, field: Field, value: FieldValue) {
        match field {
            Field::Username => self.username = into_text(value),
            Field::Zipcode => self.zipcode = non_empty(&into_text(value)),
            Field::Gender => self.gender = non_empty(&into_text(value)),
            Field::IsAgreed => {
                self.is_agreed = match value {
                    FieldValue::Checked(b) => b,
                    FieldValue::Text(s) => is_checked(&s),
                }
            }
        }
    }

    /// Selected gender if it is one of the known codes
    pub fn gender_code(&self) -> Option<GenderCode> {
        self.gender.as_deref().and_then(GenderCode::from_code)
    }
}

fn into_text(value: FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s,
        FieldValue::Checked(b) => b.to_string(),
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// A checked checkbox without a `value` attribute submits `on`
fn is_checked(s: &str) -> bool {
    s == CHECKBOX_ON
}
