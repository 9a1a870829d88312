use std::fmt;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::ValidationCode;

/// One field-level diagnostic produced by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Dotted path to the offending field, e.g. `address.zip`.
    pub field_name: String,
    pub message: String,
    pub code: ValidationCode,
    /// The offending value rendered as text.
    pub actual_value: String,
}

impl ValidationErrorDetail {
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        code: ValidationCode,
        message: impl Into<String>,
        actual_value: impl fmt::Display,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            message: message.into(),
            code,
            actual_value: actual_value.to_string(),
        }
    }
}

impl fmt::Display for ValidationErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (code: {}, value: {})",
            self.field_name, self.message, self.code, self.actual_value
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a validation failure requires at least one error")]
pub struct EmptyFailure;

/// Ordered, non-empty list of field errors carried by a failed outcome.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<ValidationErrorDetail>);

impl FieldErrors {
    pub fn new(errors: Vec<ValidationErrorDetail>) -> Result<Self, EmptyFailure> {
        if errors.is_empty() {
            return Err(EmptyFailure);
        }
        Ok(Self(errors))
    }

    #[must_use]
    pub fn single(error: ValidationErrorDetail) -> Self {
        Self(vec![error])
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn as_slice(&self) -> &[ValidationErrorDetail] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> slice::Iter<'_, ValidationErrorDetail> {
        self.0.iter()
    }

    /// Errors reported against `field_name`, in arrival order. Unknown fields
    /// yield an empty list.
    #[must_use]
    pub fn for_field(&self, field_name: &str) -> Vec<&ValidationErrorDetail> {
        self.0
            .iter()
            .filter(|error| error.field_name == field_name)
            .collect()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationErrorDetail> {
        self.0
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let errors = Vec::<ValidationErrorDetail>::deserialize(deserializer)?;
        Self::new(errors).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a ValidationErrorDetail;
    type IntoIter = slice::Iter<'a, ValidationErrorDetail>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of validating one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome<T> {
    /// Validation passed; the value is returned unchanged.
    Success(T),
    Failure(FieldErrors),
}

impl<T> ValidationOutcome<T> {
    /// Builds a failed outcome. An empty error list is rejected rather than
    /// treated as success.
    pub fn failure(errors: Vec<ValidationErrorDetail>) -> Result<Self, EmptyFailure> {
        FieldErrors::new(errors).map(Self::Failure)
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        match self {
            Self::Success(_) => 0,
            Self::Failure(errors) => errors.count(),
        }
    }

    #[must_use]
    pub const fn errors(&self) -> &[ValidationErrorDetail] {
        match self {
            Self::Success(_) => &[],
            Self::Failure(errors) => errors.as_slice(),
        }
    }

    #[must_use]
    pub fn errors_for(&self, field_name: &str) -> Vec<&ValidationErrorDetail> {
        match self {
            Self::Success(_) => Vec::new(),
            Self::Failure(errors) => errors.for_field(field_name),
        }
    }

    pub fn into_result(self) -> Result<T, FieldErrors> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(errors) => Err(errors),
        }
    }
}

/// Accumulates field errors while a validator walks a value.
///
/// Errors keep their arrival order; several errors may target the same field.
#[derive(Debug, Default, Clone)]
pub struct ErrorCollector {
    errors: Vec<ValidationErrorDetail>,
}

impl ErrorCollector {
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(
        &mut self,
        field_name: &str,
        code: ValidationCode,
        message: &str,
        actual_value: impl fmt::Display,
    ) {
        self.errors.push(ValidationErrorDetail::new(
            field_name,
            code,
            message,
            actual_value,
        ));
    }

    pub fn push(&mut self, error: ValidationErrorDetail) {
        self.errors.push(error);
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn finish<T>(self, value: T) -> ValidationOutcome<T> {
        match FieldErrors::new(self.errors) {
            Ok(errors) => ValidationOutcome::Failure(errors),
            Err(EmptyFailure) => ValidationOutcome::Success(value),
        }
    }
}
