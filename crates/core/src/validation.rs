//! Bridging `validator` results into [`CoreError`].

use validator::{Validate, ValidationErrors};

use crate::error::{CoreError, FieldErrors};

/// Message attached to a missing required field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Flatten `validator` errors into field -> messages.
///
/// Errors without a message fall back to their code.
pub fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = errs
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), messages);
    }
    fields
}

/// Run `input.validate()` and report every failing field at once.
pub fn validate_fields<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(collect_field_errors(&errors)))
}

/// Merge `extra` messages into `target`, keeping existing ones.
pub fn merge_field_errors(target: &mut FieldErrors, extra: FieldErrors) {
    for (field, messages) in extra {
        target.entry(field).or_default().extend(messages);
    }
}
