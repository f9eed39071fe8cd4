// File: src/forms/manual.rs
// Purpose: Hand-wired form controller (local values, change/submit/reset handlers)

use super::{Field, FieldValue, FormEvent, FormValues};
use tracing::info;

/// Form controller that only tracks values.
///
/// Submitting does not validate: the raw values are logged and handed back.
/// This is the unguarded counterpart of [`super::ValidatedForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualForm {
    values: FormValues,
}

impl ManualForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: FormValues) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Merge the changed field into the current values
    pub fn change(&mut self, field: Field, value: FieldValue) {
        self.values.set(field, value);
    }

    /// Prevent the default navigation and log the values as they are
    pub fn submit(&self, event: &mut FormEvent) -> FormValues {
        event.prevent_default();
        info!(values = ?self.values, "manual form submitted");
        self.values.clone()
    }

    /// Restore the default values without notifying ancestor handlers
    pub fn reset(&mut self, event: &mut FormEvent) {
        event.stop_propagation();
        self.values = FormValues::default();
    }
}
