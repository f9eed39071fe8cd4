// File: src/forms/schema.rs
// Purpose: Declarative per-field validation rules and the error map they produce

use super::{Field, FieldValue, FormValues, GenderCode};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const ZIPCODE_LENGTH_MESSAGE: &str = "Must be at most 7 characters";
pub const ZIPCODE_PATTERN_MESSAGE: &str = "Enter a 7-digit number";
pub const GENDER_MESSAGE: &str = "Select a gender";
pub const AGREEMENT_MESSAGE: &str = "You must agree to the terms";

// Exactly seven ASCII digits
static ZIPCODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{7}$").unwrap());

static SAMPLE_SCHEMA: Lazy<ValidationSchema> = Lazy::new(|| {
    ValidationSchema::new()
        .field(
            Field::Username,
            FieldRules::new().rule(Rule::required(REQUIRED_MESSAGE)),
        )
        .field(
            Field::Zipcode,
            FieldRules::optional()
                .rule(Rule::pattern(ZIPCODE_REGEX.clone(), ZIPCODE_PATTERN_MESSAGE))
                .rule(Rule::max_length(7, ZIPCODE_LENGTH_MESSAGE)),
        )
        .field(
            Field::Gender,
            FieldRules::optional().rule(Rule::one_of(
                GenderCode::ALL.iter().map(|g| g.code()),
                GENDER_MESSAGE,
            )),
        )
        .field(
            Field::IsAgreed,
            FieldRules::new().rule(Rule::must_be_true(AGREEMENT_MESSAGE)),
        )
});

/// Schema of the sample form: required username, optional 7-digit zipcode,
/// optional gender code, mandatory agreement
pub fn sample_schema() -> &'static ValidationSchema {
    &SAMPLE_SCHEMA
}

/// Evaluation phase of a rule; rules of a field run in this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Presence,
    Shape,
    Membership,
}

/// A single validation rule with its error message
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must not be empty
    Required { message: String },
    /// Text must have at most `max` characters
    MaxLength { max: usize, message: String },
    /// Text must match the regex
    Pattern { regex: Regex, message: String },
    /// Text must be one of the allowed values
    OneOf { allowed: Vec<String>, message: String },
    /// Checkbox must be checked
    MustBeTrue { message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required { message: message.into() }
    }

    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Rule::MaxLength { max, message: message.into() }
    }

    pub fn pattern(regex: Regex, message: impl Into<String>) -> Self {
        Rule::Pattern { regex, message: message.into() }
    }

    pub fn one_of<I, S>(allowed: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::OneOf {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn must_be_true(message: impl Into<String>) -> Self {
        Rule::MustBeTrue { message: message.into() }
    }

    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MaxLength { message, .. }
            | Rule::Pattern { message, .. }
            | Rule::OneOf { message, .. }
            | Rule::MustBeTrue { message } => message,
        }
    }

    fn phase(&self) -> Phase {
        match self {
            Rule::Required { .. } => Phase::Presence,
            Rule::MaxLength { .. } | Rule::Pattern { .. } => Phase::Shape,
            Rule::OneOf { .. } | Rule::MustBeTrue { .. } => Phase::Membership,
        }
    }

    /// Whether the value passes this rule
    pub fn check(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Rule::Required { .. }, v) => !v.is_absent(),
            (Rule::MaxLength { max, .. }, FieldValue::Text(s)) => s.chars().count() <= *max,
            (Rule::Pattern { regex, .. }, FieldValue::Text(s)) => regex.is_match(s),
            (Rule::OneOf { allowed, .. }, FieldValue::Text(s)) => allowed.iter().any(|a| a == s),
            (Rule::OneOf { allowed, .. }, FieldValue::Checked(b)) => {
                allowed.iter().any(|a| a == &b.to_string())
            }
            (Rule::MustBeTrue { .. }, FieldValue::Checked(b)) => *b,
            (Rule::MustBeTrue { .. }, FieldValue::Text(_)) => false,
            // Text-shape rules do not constrain checkboxes
            (Rule::MaxLength { .. } | Rule::Pattern { .. }, FieldValue::Checked(_)) => true,
        }
    }
}

/// The rule set bound to one field
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    optional: bool,
    rules: Vec<Rule>,
}

impl FieldRules {
    /// Rules that always run
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules that are skipped while the field has no value
    pub fn optional() -> Self {
        Self {
            optional: true,
            rules: Vec::new(),
        }
    }

    /// Add a rule. Rules are kept in phase order (presence, shape,
    /// membership); within a phase, length rules precede patterns and
    /// otherwise insertion order is kept.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self.rules.sort_by_key(|r| (r.phase(), !matches!(r, Rule::MaxLength { .. })));
        self
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Message of the first failing rule, if any
    pub fn first_failure(&self, value: &FieldValue) -> Option<&str> {
        if self.optional && value.is_absent() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| !rule.check(value))
            .map(Rule::message)
    }
}

/// Per-field rule sets; a field has at most one
#[derive(Debug, Clone, Default)]
pub struct ValidationSchema {
    fields: BTreeMap<Field, FieldRules>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a rule set to a field, replacing any previous one
    pub fn field(mut self, field: Field, rules: FieldRules) -> Self {
        self.fields.insert(field, rules);
        self
    }

    pub fn rules_for(&self, field: Field) -> Option<&FieldRules> {
        self.fields.get(&field)
    }

    /// Evaluate every field's rules against the values.
    ///
    /// Pure and deterministic: the same values always yield the same map.
    pub fn validate(&self, values: &FormValues) -> ErrorMap {
        let mut errors = ErrorMap::new();
        for (field, rules) in &self.fields {
            if let Some(message) = rules.first_failure(&values.value(*field)) {
                errors.insert(*field, message.to_string());
            }
        }
        errors
    }
}

/// Field error messages from the most recent validation pass.
/// A field without an entry passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<Field, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, field: Field, message: String) {
        self.0.insert(field, message);
    }

    /// Error message for a field
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(|s| s.as_str())
    }

    pub fn has_error(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields with errors, in field order
    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(())` when there are no errors
    pub fn into_result(self) -> Result<(), ErrorMap> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}
