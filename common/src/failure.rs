use std::fmt::{self, Write};

use crate::{ClientValidationErrorResponse, FieldErrors, ValidationErrorDetail};

/// Request context attached to a failure when it is raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub url: Option<String>,
    pub status_code: Option<u16>,
}

impl RequestContext {
    #[must_use]
    pub const fn new(url: Option<String>, status_code: Option<u16>) -> Self {
        Self { url, status_code }
    }
}

/// A response body that parsed but broke one or more validation rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{summary}")]
pub struct ResponseValidationError {
    errors: FieldErrors,
    context: RequestContext,
    summary: String,
}

impl ResponseValidationError {
    #[must_use]
    pub fn new(errors: FieldErrors, context: RequestContext) -> Self {
        let summary = summarize(errors.count(), &context);
        Self {
            errors,
            context,
            summary,
        }
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.count()
    }

    #[must_use]
    pub fn errors_for(&self, field_name: &str) -> Vec<&ValidationErrorDetail> {
        self.errors.for_field(field_name)
    }

    #[must_use]
    pub const fn context(&self) -> &RequestContext {
        &self.context
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.context.url.as_deref()
    }

    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.context.status_code
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    #[must_use]
    pub fn error_response(&self) -> ClientValidationErrorResponse {
        ClientValidationErrorResponse::from(self)
    }

    #[must_use]
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

fn summarize(error_count: usize, context: &RequestContext) -> String {
    let mut summary = format!("Response validation failed with {error_count} error(s)");
    if let Some(url) = &context.url {
        let _ = write!(summary, " for {url}");
    }
    if let Some(status) = context.status_code {
        let _ = write!(summary, " (status: {status})");
    }
    summary
}

/// Substituted for the body text when the body could not be read.
pub const BODY_UNAVAILABLE: &str = "<response body unavailable>";

/// A response whose status code is outside the accepted set. Body validation
/// never runs for such a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRejection {
    pub status_code: u16,
    pub url: Option<String>,
    /// Raw body text, or a placeholder when the body was unreadable.
    pub body: String,
}

impl StatusRejection {
    #[must_use]
    pub const fn new(status_code: u16, url: Option<String>, body: String) -> Self {
        Self {
            status_code,
            url,
            body,
        }
    }

    #[must_use]
    pub fn with_unreadable_body(
        status_code: u16,
        url: Option<String>,
        reason: &dyn fmt::Display,
    ) -> Self {
        Self::new(status_code, url, format!("{BODY_UNAVAILABLE}: {reason}"))
    }

    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code, 400..=499)
    }

    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self.status_code, 500..=599)
    }
}

impl fmt::Display for StatusRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unexpected response status {}", self.status_code)?;
        if let Some(url) = &self.url {
            write!(f, " for {url}")?;
        }
        Ok(())
    }
}

impl std::error::Error for StatusRejection {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ValidationCode;

    fn two_errors() -> FieldErrors {
        FieldErrors::new(vec![
            ValidationErrorDetail::new("age", ValidationCode::OutOfRange, "negative", -1),
            ValidationErrorDetail::new("email", ValidationCode::PatternMismatch, "bad", "x"),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_with_url_and_status() {
        let error = ResponseValidationError::new(
            two_errors(),
            RequestContext::new(Some("https://api.example/users/1".to_string()), Some(200)),
        );
        assert_eq!(
            error.to_string(),
            "Response validation failed with 2 error(s) for https://api.example/users/1 (status: 200)"
        );
        assert_eq!(error.summary(), error.to_string());
    }

    #[test]
    fn test_summary_without_context() {
        let error = ResponseValidationError::new(two_errors(), RequestContext::default());
        assert_eq!(
            error.to_string(),
            "Response validation failed with 2 error(s)"
        );
    }

    #[test]
    fn test_summary_with_status_only() {
        let error =
            ResponseValidationError::new(two_errors(), RequestContext::new(None, Some(201)));
        assert_eq!(
            error.to_string(),
            "Response validation failed with 2 error(s) (status: 201)"
        );
    }

    #[test]
    fn test_summary_with_url_only() {
        let error = ResponseValidationError::new(
            two_errors(),
            RequestContext::new(Some("http://h/x".to_string()), None),
        );
        assert_eq!(
            error.to_string(),
            "Response validation failed with 2 error(s) for http://h/x"
        );
    }

    #[test]
    fn test_validation_error_keeps_errors_queryable() {
        let error = ResponseValidationError::new(two_errors(), RequestContext::default());
        assert_eq!(error.error_count(), 2);
        assert_eq!(error.errors_for("age").len(), 1);
        assert!(error.errors_for("missing").is_empty());
        assert_eq!(error.into_errors(), two_errors());
    }

    fn rejection(status_code: u16) -> StatusRejection {
        StatusRejection::new(status_code, None, String::new())
    }

    #[test]
    fn test_status_classes() {
        let not_found = rejection(404);
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let unavailable = rejection(503);
        assert!(!unavailable.is_client_error());
        assert!(unavailable.is_server_error());

        let redirect = rejection(302);
        assert!(!redirect.is_client_error());
        assert!(!redirect.is_server_error());

        assert!(rejection(400).is_client_error());
        assert!(rejection(499).is_client_error());
        assert!(rejection(500).is_server_error());
        assert!(rejection(599).is_server_error());
        assert!(!rejection(600).is_server_error());
    }

    #[test]
    fn test_status_rejection_display() {
        let not_found = StatusRejection::new(
            404,
            Some("https://api.example/users/9".to_string()),
            "not found".to_string(),
        );
        assert_eq!(
            not_found.to_string(),
            "Unexpected response status 404 for https://api.example/users/9"
        );
        assert_eq!(rejection(500).to_string(), "Unexpected response status 500");
    }

    #[test]
    fn test_status_rejection_unreadable_body() {
        let rejection = StatusRejection::with_unreadable_body(502, None, &"connection reset");
        assert_eq!(
            rejection.body,
            "<response body unavailable>: connection reset"
        );
    }
}
