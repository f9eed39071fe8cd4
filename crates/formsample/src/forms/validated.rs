// File: src/forms/validated.rs
// Purpose: Schema-validated form controller with field-level errors

use super::{ErrorMap, Field, FieldValue, FormEvent, FormValues, ValidationSchema};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// When validation runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Only on submit; after the first submit attempt, also on change
    #[default]
    OnSubmit,
    /// On every change
    OnChange,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the success handler ran with these values
    Submitted(FormValues),
    /// Validation failed; nothing was submitted
    Rejected(ErrorMap),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

/// Form controller whose values are governed by a [`ValidationSchema`]
#[derive(Debug, Clone)]
pub struct ValidatedForm<'s> {
    schema: &'s ValidationSchema,
    mode: ValidationMode,
    values: FormValues,
    errors: ErrorMap,
    submit_attempted: bool,
}

impl<'s> ValidatedForm<'s> {
    pub fn new(schema: &'s ValidationSchema, mode: ValidationMode) -> Self {
        Self {
            schema,
            mode,
            values: FormValues::default(),
            errors: ErrorMap::new(),
            submit_attempted: false,
        }
    }

    /// Start from existing values (e.g. a submitted request body)
    pub fn with_values(mut self, values: FormValues) -> Self {
        self.values = values;
        self
    }

    /// Restore the "already submitted once" state carried between requests.
    /// The error map is recomputed so the form renders what the user saw.
    pub fn with_submit_attempted(mut self, attempted: bool) -> Self {
        self.submit_attempted = attempted;
        if attempted {
            self.errors = self.validate();
        }
        self
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Run the schema against the current values without touching state
    pub fn validate(&self) -> ErrorMap {
        self.schema.validate(&self.values)
    }

    /// Merge the changed field; re-validate when the mode asks for it
    pub fn change(&mut self, field: Field, value: FieldValue) {
        self.values.set(field, value);
        self.refresh();
        debug!(%field, errors = self.errors.len(), "field changed");
    }

    /// Apply the change rule to values that already include the change:
    /// errors are recomputed when the mode or an earlier submit asks for it
    pub fn refresh(&mut self) {
        if self.revalidates_on_change() {
            self.errors = self.validate();
        }
    }

    /// Validate and, when clean, hand the values to `on_success`
    pub fn submit<F>(&mut self, event: &mut FormEvent, on_success: F) -> SubmitOutcome
    where
        F: FnOnce(&FormValues),
    {
        event.prevent_default();
        self.submit_attempted = true;
        self.errors = self.validate();

        if self.errors.is_empty() {
            on_success(&self.values);
            SubmitOutcome::Submitted(self.values.clone())
        } else {
            debug!(fields = ?self.errors.fields(), "submit rejected");
            SubmitOutcome::Rejected(self.errors.clone())
        }
    }

    /// Restore defaults, clear errors and the submit state
    pub fn reset(&mut self, event: &mut FormEvent) {
        event.stop_propagation();
        self.values = FormValues::default();
        self.errors = ErrorMap::new();
        self.submit_attempted = false;
    }

    fn revalidates_on_change(&self) -> bool {
        match self.mode {
            ValidationMode::OnChange => true,
            ValidationMode::OnSubmit => self.submit_attempted,
        }
    }
}
