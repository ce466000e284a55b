//! Collected validation messages of one or more composed forms

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field and form level validation messages.
///
/// Field keys are namespaced by the form they came from (`ad.title`,
/// `images.0`, `properties.prop_<id>`) once forms are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormErrors {
    pub non_field_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single form level message
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add_non_field(message);
        errors
    }

    /// A single message on one field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add_field(field, message);
        errors
    }

    pub fn add_field(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.non_field_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Messages recorded for `field`
    pub fn for_field(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Fold another form's errors in, namespacing its fields as `<prefix>.<field>`.
    /// Its form level messages are recorded under the bare prefix.
    pub fn merge_prefixed(&mut self, prefix: &str, other: FormErrors) {
        for message in other.non_field_errors {
            self.add_field(prefix, message);
        }
        for (field, messages) in other.field_errors {
            self.field_errors
                .entry(format!("{prefix}.{field}"))
                .or_default()
                .extend(messages);
        }
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}
