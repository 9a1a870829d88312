use reqwest::Url;
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

mod config;
mod dispatch;
mod error;
mod gate;
mod pipeline;
mod registry;
mod response;

pub use config::{Config, ConfigError, LogFormat, Logging};
pub use dispatch::Dispatcher;
pub use error::VettedError;
pub use gate::{AcceptedStatuses, InvalidStatusSet, SUCCESS_STATUS_CODES, VALID_STATUS_CODES};
pub use pipeline::ResponsePipeline;
pub use registry::{
    ValidatorLookup, ValidatorNotRegistered, ValidatorRegistry, ValidatorRegistryBuilder,
};
pub use response::{BodyUnavailable, BufferedResponse, CompletedResponse};
pub use vetted_common::*;

pub const NAME: &str = "VettedClient";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const TIMEOUT: Duration = Duration::from_secs(5);
const USER_AGENT_VALUE: &str = concat!("VettedClient/", env!("CARGO_PKG_VERSION"));

pub struct VettedClientBuilder {
    accepted: AcceptedStatuses,
    timeout: Duration,
    token: Option<String>,
    registry: Arc<ValidatorRegistry>,
}

impl VettedClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accepted: AcceptedStatuses::default(),
            timeout: TIMEOUT,
            token: None,
            registry: Arc::new(ValidatorRegistry::default()),
        }
    }

    #[must_use]
    pub fn accepted_statuses(mut self, accepted: AcceptedStatuses) -> Self {
        self.accepted = accepted;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: Arc<ValidatorRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self, base_url: &str) -> Result<VettedClient, VettedError> {
        VettedClient::new(base_url, self)
    }
}

impl Default for VettedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Blocking HTTP client whose JSON responses are status-checked and validated
/// before they reach the caller.
#[derive(Debug)]
pub struct VettedClient {
    base_url: Url,
    client: ReqwestClient,
    pipeline: ResponsePipeline,
}

impl VettedClient {
    fn new(base_url: &str, builder: VettedClientBuilder) -> Result<Self, VettedError> {
        let base_url = Url::parse(base_url)?;
        let headers = Self::set_headers(builder.token.as_deref())?;

        let client = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(builder.timeout)
            .build()?;

        Ok(Self {
            base_url,
            client,
            pipeline: ResponsePipeline::new(builder.accepted, builder.registry),
        })
    }

    pub fn from_config(
        config: &Config,
        registry: Arc<ValidatorRegistry>,
    ) -> Result<Self, VettedError> {
        config.validate()?;
        let mut builder = Self::builder()
            .accepted_statuses(config.accepted_statuses.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .registry(registry);
        if let Some(token) = &config.token {
            builder = builder.token(token.as_str());
        }
        builder.build(&config.base_url)
    }

    #[must_use]
    pub fn builder() -> VettedClientBuilder {
        VettedClientBuilder::new()
    }

    #[must_use]
    pub const fn info(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub const fn pipeline(&self) -> &ResponsePipeline {
        &self.pipeline
    }

    fn url(&self, endpoint: &str) -> Result<Url, VettedError> {
        Ok(self.base_url.join(endpoint)?)
    }

    fn set_headers(token: Option<&str>) -> Result<HeaderMap, VettedError> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))?,
            );
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn send_validated<T>(&self, request: RequestBuilder) -> Result<T, VettedError>
    where
        T: DeserializeOwned + 'static,
    {
        let response = request.send()?;
        self.pipeline.validate(response)
    }

    pub fn get<T>(&self, endpoint: &str) -> Result<T, VettedError>
    where
        T: DeserializeOwned + 'static,
    {
        let url = self.url(endpoint)?;
        self.send_validated(self.client.get(url))
    }

    pub fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, VettedError>
    where
        T: DeserializeOwned + 'static,
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint)?;
        let req = self.client.post(url);
        let req = if let Some(b) = body { req.json(b) } else { req };
        self.send_validated(req)
    }

    pub fn put<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<T, VettedError>
    where
        T: DeserializeOwned + 'static,
        B: Serialize + ?Sized,
    {
        let url = self.url(endpoint)?;
        let req = self.client.put(url);
        let req = if let Some(b) = body { req.json(b) } else { req };
        self.send_validated(req)
    }

    /// Deletes have no body to validate; only the status gate applies.
    pub fn delete(&self, endpoint: &str) -> Result<(), VettedError> {
        let url = self.url(endpoint)?;
        let response = self.client.delete(url).send()?;
        self.pipeline.check_status(response).map(drop)
    }
}
