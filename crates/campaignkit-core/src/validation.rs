//! Field validators and per-step validation reports.
//!
//! Validation never raises: a failed check yields an [`FieldError`] inside a
//! [`ValidationReport`], and a step can be left only when its report is empty.

use std::collections::BTreeSet;
use std::fmt;

/// Validation result for a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Validation passed.
    Valid,
    /// Validation failed with an error message.
    Invalid(String),
}

impl ValidationResult {
    /// Check if validation passed.
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Get the error message if invalid.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Invalid(msg) => Some(msg),
            Self::Valid => None,
        }
    }
}

/// A check over one value of type `T`.
pub trait Validator<T: ?Sized> {
    /// Validate the given value.
    fn validate(&self, value: &T) -> ValidationResult;

    /// Get the name of this validator.
    fn name(&self) -> &str;
}

/// Text must be non-empty.
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
}

impl Required {
    /// Create a required validator with default message.
    pub fn new() -> Self {
        Self {
            message: "This field is required".to_string(),
        }
    }

    /// Create with custom message.
    pub fn with_message(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() {
            ValidationResult::Invalid(self.message.clone())
        } else {
            ValidationResult::Valid
        }
    }

    fn name(&self) -> &'static str {
        "required"
    }
}

/// Number must be strictly greater than zero.
#[derive(Debug, Clone)]
pub struct Positive {
    message: String,
}

impl Positive {
    /// Create a positive-number validator with default message.
    pub fn new() -> Self {
        Self {
            message: "Must be greater than zero".to_string(),
        }
    }

    /// Create with custom message.
    pub fn with_message(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Default for Positive {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<f64> for Positive {
    fn validate(&self, value: &f64) -> ValidationResult {
        if *value > 0.0 {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(self.message.clone())
        }
    }

    fn name(&self) -> &'static str {
        "positive"
    }
}

/// A single choice must have been made, or a multi-select must be non-empty.
#[derive(Debug, Clone)]
pub struct Selected {
    message: String,
}

impl Selected {
    /// Create with a message.
    pub fn with_message(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl<T> Validator<Option<T>> for Selected {
    fn validate(&self, value: &Option<T>) -> ValidationResult {
        if value.is_some() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(self.message.clone())
        }
    }

    fn name(&self) -> &'static str {
        "selected"
    }
}

impl<T> Validator<BTreeSet<T>> for Selected {
    fn validate(&self, value: &BTreeSet<T>) -> ValidationResult {
        if value.is_empty() {
            ValidationResult::Invalid(self.message.clone())
        } else {
            ValidationResult::Valid
        }
    }

    fn name(&self) -> &'static str {
        "selected"
    }
}

/// A failed requirement on a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field that failed.
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collected field errors for one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// An empty (passing) report.
    pub const fn valid() -> Self {
        Self { errors: Vec::new() }
    }

    /// Run `validator` on `value` and record a failure under `field`.
    pub fn check<T: ?Sized, V: Validator<T>>(
        mut self,
        field: &'static str,
        value: &T,
        validator: &V,
    ) -> Self {
        let result = validator.validate(value);
        if let Some(message) = result.error() {
            log::trace!("{field} failed the {} check", validator.name());
            self.errors.push(FieldError {
                field,
                message: message.to_string(),
            });
        }
        self
    }

    /// Whether every check passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded failures in check order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First failure message, if any.
    pub fn first_error_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// Whether `field` failed.
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}
