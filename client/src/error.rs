use std::error::Error as StdError;

use vetted_common::{ClientValidationErrorResponse, ResponseValidationError, StatusRejection};

use crate::config::ConfigError;
use crate::registry::ValidatorNotRegistered;

#[derive(Debug, thiserror::Error)]
pub enum VettedError {
    /// The response status is outside the accepted set.
    #[error(transparent)]
    Status(#[from] StatusRejection),
    /// The body parsed but failed validation.
    #[error(transparent)]
    Validation(#[from] ResponseValidationError),
    /// The requested body type has no validator.
    #[error("Configuration error: {0}")]
    NotRegistered(#[from] ValidatorNotRegistered),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to read response body: {0}")]
    Body(Box<dyn StdError + Send + Sync>),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl VettedError {
    #[must_use]
    pub const fn is_status_rejection(&self) -> bool {
        matches!(self, Self::Status(_))
    }

    #[must_use]
    pub const fn is_validation_failure(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True for client-side setup defects, as opposed to anything the server
    /// sent back.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::NotRegistered(_) | Self::Config(_) | Self::UrlParse(_) | Self::InvalidHeader(_)
        )
    }

    /// The transport-safe error body, for validation failures only.
    #[must_use]
    pub fn error_response(&self) -> Option<ClientValidationErrorResponse> {
        match self {
            Self::Validation(e) => Some(e.error_response()),
            Self::Status(_)
            | Self::NotRegistered(_)
            | Self::Http(_)
            | Self::Body(_)
            | Self::Json(_)
            | Self::UrlParse(_)
            | Self::InvalidHeader(_)
            | Self::Config(_) => None,
        }
    }
}
