//! Field validation for tool arguments.
//!
//! Checks accumulate into a [`ValidationResult`] so every problem with an
//! input is reported at once rather than one per attempt.

use regex::Regex;

/// Result of validating input.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the input is valid.
    pub is_valid: bool,
    /// Validation errors if any.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a successful validation result.
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: vec![],
        }
    }

    /// Create a validation result with an error.
    pub fn error(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            errors: vec![error],
        }
    }

    /// Merge another validation result into this one.
    pub fn merge(mut self, other: Self) -> Self {
        self.is_valid = self.is_valid && other.is_valid;
        self.errors.extend(other.errors);
        self
    }

    /// One `field: message` line per error.
    pub fn describe(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// A validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Error message.
    pub message: String,
    /// Error code for programmatic handling.
    pub code: ValidationErrorCode,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>, code: ValidationErrorCode) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
            code,
        }
    }
}

/// Error codes for validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    Missing,
    Empty,
    InvalidFormat,
    OutOfRange,
}

/// Accumulating field checks over a JSON object of arguments.
pub struct FieldValidator<'a> {
    params: &'a serde_json::Value,
    result: ValidationResult,
}

impl<'a> FieldValidator<'a> {
    pub fn new(params: &'a serde_json::Value) -> Self {
        Self {
            params,
            result: ValidationResult::ok(),
        }
    }

    fn fail(&mut self, field: &str, message: impl Into<String>, code: ValidationErrorCode) {
        self.result = std::mem::take(&mut self.result)
            .merge(ValidationResult::error(ValidationError::new(field, message, code)));
    }

    /// A string field that must be present and non-blank. Returns the trimmed value.
    pub fn required_str(&mut self, field: &str, empty_message: &str) -> Option<String> {
        match self.params.get(field) {
            None | Some(serde_json::Value::Null) => {
                self.fail(field, "Required", ValidationErrorCode::Missing);
                None
            }
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => {
                self.fail(field, empty_message, ValidationErrorCode::Empty);
                None
            }
            Some(serde_json::Value::String(s)) => Some(s.trim().to_string()),
            Some(_) => {
                self.fail(field, "Expected a string", ValidationErrorCode::InvalidFormat);
                None
            }
        }
    }

    /// A required string field that must match `pattern`.
    pub fn matching(&mut self, field: &str, pattern: &Regex, message: &str) -> Option<String> {
        let value = self.required_str(field, message)?;
        if pattern.is_match(&value) {
            Some(value)
        } else {
            self.fail(field, message, ValidationErrorCode::InvalidFormat);
            None
        }
    }

    /// An optional string field. Blank counts as absent.
    pub fn optional_str(&mut self, field: &str) -> Option<String> {
        match self.params.get(field) {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => {
                Some(s.trim().to_string())
            }
            Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => None,
            Some(_) => {
                self.fail(field, "Expected a string", ValidationErrorCode::InvalidFormat);
                None
            }
        }
    }

    /// A whole number in `min..=max`. Numeric strings are accepted.
    pub fn integer_in(&mut self, field: &str, min: u32, max: u32) -> Option<u32> {
        let Some(value) = self.params.get(field).filter(|v| !v.is_null()) else {
            self.fail(field, "Required", ValidationErrorCode::Missing);
            return None;
        };
        let Some(n) = as_integer(value) else {
            self.fail(field, "Must be an integer", ValidationErrorCode::InvalidFormat);
            return None;
        };
        if n < i64::from(min) {
            self.fail(
                field,
                format!("Must be at least {}", min),
                ValidationErrorCode::OutOfRange,
            );
            return None;
        }
        if n > i64::from(max) {
            self.fail(
                field,
                format!("Must be at most {}", max),
                ValidationErrorCode::OutOfRange,
            );
            return None;
        }
        u32::try_from(n).ok()
    }

    /// Record a failure found by the caller.
    pub fn reject(&mut self, field: &str, message: &str, code: ValidationErrorCode) {
        self.fail(field, message, code);
    }

    pub fn finish(self) -> ValidationResult {
        self.result
    }
}

/// Interpret a JSON number or numeric string as a whole number.
pub fn as_integer(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
