//! Field-level validation shared by entity drafts.
//!
//! Drafts collect every violation before failing so clients can fix all
//! fields in one round trip. The collected list converts into an
//! [`Error::invalid_request`] carrying `{"fieldErrors": [...]}` details.

use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::json;

use super::Error;

/// Category of a field violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Required,
    Length,
    Range,
    Format,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub code: ViolationCode,
    pub message: String,
}

/// Every violation found while validating one draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .violations.len())]
pub struct DraftValidationError {
    violations: Vec<FieldViolation>,
}

impl DraftValidationError {
    /// Violations in the order the fields were checked.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Whether `field` was rejected.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

impl From<DraftValidationError> for Error {
    fn from(error: DraftValidationError) -> Self {
        Error::invalid_request("request validation failed")
            .with_details(json!({ "fieldErrors": error.violations }))
    }
}

/// Accumulates violations while a draft is assembled.
#[derive(Debug, Default)]
pub(crate) struct FieldChecks {
    violations: Vec<FieldViolation>,
}

impl FieldChecks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &'static str, code: ViolationCode, message: String) {
        self.violations.push(FieldViolation {
            field,
            code,
            message,
        });
    }

    /// Trim a required text field and check its length in characters.
    pub(crate) fn required_text(
        &mut self,
        field: &'static str,
        value: &str,
        bounds: RangeInclusive<usize>,
    ) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, ViolationCode::Required, format!("{field} is required"));
        } else if !bounds.contains(&trimmed.chars().count()) {
            self.push(
                field,
                ViolationCode::Length,
                format!(
                    "{field} must be between {} and {} characters",
                    bounds.start(),
                    bounds.end()
                ),
            );
        }
        trimmed.to_owned()
    }

    /// Trim optional text, treating absence as empty, and cap its length.
    pub(crate) fn optional_text(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        max: usize,
    ) -> String {
        let trimmed = value.map(str::trim).unwrap_or_default();
        if trimmed.chars().count() > max {
            self.push(
                field,
                ViolationCode::Length,
                format!("{field} must be at most {max} characters"),
            );
        }
        trimmed.to_owned()
    }

    /// Record a value shorter than `min` characters.
    pub(crate) fn length_at_least(&mut self, field: &'static str, min: usize) {
        self.push(
            field,
            ViolationCode::Length,
            format!("{field} must be at least {min} characters"),
        );
    }

    /// Record a value longer than `max` bytes.
    pub(crate) fn length_at_most_bytes(&mut self, field: &'static str, max: usize) {
        self.push(
            field,
            ViolationCode::Length,
            format!("{field} must be at most {max} bytes"),
        );
    }

    /// Reject negative counts and durations.
    pub(crate) fn non_negative(&mut self, field: &'static str, value: i32) -> i32 {
        if value < 0 {
            self.push(
                field,
                ViolationCode::Range,
                format!("{field} must be zero or greater"),
            );
        }
        value
    }

    /// Record a format violation when `valid` is false.
    pub(crate) fn format(&mut self, field: &'static str, valid: bool, message: &str) {
        if !valid {
            self.push(field, ViolationCode::Format, message.to_owned());
        }
    }

    /// Record an out-of-range value.
    pub(crate) fn range(&mut self, field: &'static str, message: &str) {
        self.push(field, ViolationCode::Range, message.to_owned());
    }

    /// Record a missing required value.
    pub(crate) fn missing(&mut self, field: &'static str) {
        self.push(field, ViolationCode::Required, format!("{field} is required"));
    }

    /// Whether nothing has been rejected so far.
    pub(crate) fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Convert the recorded violations into an error.
    ///
    /// Callers use this when a draft cannot be assembled at all; an empty
    /// list still yields an error so the failure is not lost.
    pub(crate) fn into_error(self) -> DraftValidationError {
        DraftValidationError {
            violations: self.violations,
        }
    }

    /// Return `value` when no violation was recorded.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, DraftValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(DraftValidationError {
                violations: self.violations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("  soup  ", "soup", None)]
    #[case("   ", "", Some(ViolationCode::Required))]
    #[case("ab", "ab", Some(ViolationCode::Length))]
    fn required_text_trims_and_checks(
        #[case] input: &str,
        #[case] expected: &str,
        #[case] violation: Option<ViolationCode>,
    ) {
        let mut checks = FieldChecks::new();
        let value = checks.required_text("name", input, 3..=255);
        assert_eq!(value, expected);
        let codes: Vec<_> = checks.violations.iter().map(|v| v.code).collect();
        assert_eq!(codes, violation.into_iter().collect::<Vec<_>>());
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        let mut checks = FieldChecks::new();
        checks.required_text("name", "çàé", 3..=3);
        assert!(checks.finish(()).is_ok());
    }

    #[rstest]
    fn violations_convert_to_field_error_details() {
        let mut checks = FieldChecks::new();
        checks.non_negative("servings", -1);
        checks.missing("password");
        let error: Error = checks.finish(()).expect_err("two violations").into();

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(details["fieldErrors"][0]["field"], "servings");
        assert_eq!(details["fieldErrors"][0]["code"], "range");
        assert_eq!(details["fieldErrors"][1]["code"], "required");
    }
}
