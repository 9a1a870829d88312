use std::error::Error as StdError;

use reqwest::blocking::Response;

/// A response whose transport has completed.
pub trait CompletedResponse {
    type Error: StdError + Send + Sync + 'static;

    fn status(&self) -> u16;

    fn url(&self) -> Option<String>;

    fn text(self) -> Result<String, Self::Error>;
}

impl CompletedResponse for Response {
    type Error = reqwest::Error;

    fn status(&self) -> u16 {
        Self::status(self).as_u16()
    }

    fn url(&self) -> Option<String> {
        Some(Self::url(self).to_string())
    }

    fn text(self) -> Result<String, Self::Error> {
        Self::text(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("response body is not available")]
pub struct BodyUnavailable;

/// A response already held in memory, e.g. replayed from a cache or received
/// through another transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedResponse {
    status: u16,
    url: Option<String>,
    body: Option<String>,
}

impl BufferedResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            url: None,
            body: Some(body.into()),
        }
    }

    #[must_use]
    pub const fn without_body(status: u16) -> Self {
        Self {
            status,
            url: None,
            body: None,
        }
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl CompletedResponse for BufferedResponse {
    type Error = BodyUnavailable;

    fn status(&self) -> u16 {
        self.status
    }

    fn url(&self) -> Option<String> {
        self.url.clone()
    }

    fn text(self) -> Result<String, Self::Error> {
        self.body.ok_or(BodyUnavailable)
    }
}
