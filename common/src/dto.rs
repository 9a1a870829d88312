use serde::{Deserialize, Serialize};

use crate::{
    FieldErrors, RequestContext, ResponseValidationError, ValidationErrorDetail, ValidationOutcome,
};

pub const VALIDATION_FAILED_MESSAGE: &str = "Response validation failed";

/// Flattened, serializable view of one [`ValidationErrorDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientValidationErrorDetail {
    pub field_name: String,
    pub message: String,
    pub code: String,
    pub value: String,
    pub url: Option<String>,
}

impl ClientValidationErrorDetail {
    fn project(error: &ValidationErrorDetail, url: Option<&String>) -> Self {
        Self {
            field_name: error.field_name.clone(),
            message: error.message.clone(),
            code: error.code.to_string(),
            value: error.actual_value.clone(),
            url: url.cloned(),
        }
    }
}

/// Error body suitable for logging sinks or re-emission to a downstream
/// consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientValidationErrorResponse {
    pub message: String,
    pub errors: Vec<ClientValidationErrorDetail>,
    pub url: Option<String>,
    pub status_code: Option<u16>,
}

impl ClientValidationErrorResponse {
    /// Builds the response straight from a failed outcome's errors.
    #[must_use]
    pub fn from_failure(
        errors: &FieldErrors,
        url: Option<&str>,
        status_code: Option<u16>,
    ) -> Self {
        project(
            errors,
            &RequestContext::new(url.map(str::to_string), status_code),
        )
    }

    /// `None` when the outcome is a success.
    #[must_use]
    pub fn from_outcome<T>(
        outcome: &ValidationOutcome<T>,
        url: Option<&str>,
        status_code: Option<u16>,
    ) -> Option<Self> {
        match outcome {
            ValidationOutcome::Success(_) => None,
            ValidationOutcome::Failure(errors) => {
                Some(Self::from_failure(errors, url, status_code))
            }
        }
    }
}

impl From<&ResponseValidationError> for ClientValidationErrorResponse {
    fn from(error: &ResponseValidationError) -> Self {
        project(error.errors(), error.context())
    }
}

fn project(errors: &FieldErrors, context: &RequestContext) -> ClientValidationErrorResponse {
    ClientValidationErrorResponse {
        message: VALIDATION_FAILED_MESSAGE.to_string(),
        errors: errors
            .iter()
            .map(|error| ClientValidationErrorDetail::project(error, context.url.as_ref()))
            .collect(),
        url: context.url.clone(),
        status_code: context.status_code,
    }
}
