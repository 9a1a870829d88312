use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use vetted_common::{RequestContext, ResponseValidationError, ValidationOutcome};

use crate::dispatch::Dispatcher;
use crate::error::VettedError;
use crate::gate::AcceptedStatuses;
use crate::registry::{ValidatorLookup, ValidatorRegistry};
use crate::response::CompletedResponse;

/// Fetch-and-validate entry point for completed responses.
///
/// Each call runs status gate, body parsing and validation in that order and
/// stops at the first failure. Nothing is retried.
#[derive(Debug)]
pub struct ResponsePipeline<L = ValidatorRegistry> {
    accepted: AcceptedStatuses,
    dispatcher: Dispatcher<L>,
}

impl<L> Clone for ResponsePipeline<L> {
    fn clone(&self) -> Self {
        Self {
            accepted: self.accepted.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<L: ValidatorLookup> ResponsePipeline<L> {
    #[must_use]
    pub const fn new(accepted: AcceptedStatuses, lookup: Arc<L>) -> Self {
        Self {
            accepted,
            dispatcher: Dispatcher::new(lookup),
        }
    }

    #[must_use]
    pub const fn accepted_statuses(&self) -> &AcceptedStatuses {
        &self.accepted
    }

    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<L> {
        &self.dispatcher
    }

    pub fn validate<T, R>(&self, response: R) -> Result<T, VettedError>
    where
        T: DeserializeOwned + 'static,
        R: CompletedResponse,
    {
        let response = self.check_status(response)?;
        let status = response.status();
        let url = response.url();
        debug!(status, url = url.as_deref(), "Response status accepted");

        let text = response
            .text()
            .map_err(|e| VettedError::Body(Box::new(e)))?;
        let value: T = serde_json::from_str(&text)?;

        self.validate_value(value, RequestContext::new(url, Some(status)))
    }

    /// Validates a body that has already been parsed. `context` is attached to
    /// the raised failure.
    pub fn validate_value<T: 'static>(
        &self,
        value: T,
        context: RequestContext,
    ) -> Result<T, VettedError> {
        let outcome = self.dispatcher.dispatch(value).inspect_err(|e| {
            error!(
                type_name = e.type_name,
                url = context.url.as_deref(),
                "No validator registered for response type"
            );
        })?;

        match outcome {
            ValidationOutcome::Success(value) => {
                debug!(url = context.url.as_deref(), "Response body validated");
                Ok(value)
            }
            ValidationOutcome::Failure(errors) => {
                let failure = ResponseValidationError::new(errors, context);
                warn!(
                    url = failure.url(),
                    status = failure.status_code(),
                    error_count = failure.error_count(),
                    "{failure}"
                );
                Err(failure.into())
            }
        }
    }

    /// Status gate only, for responses whose body is not needed.
    pub fn check_status<R: CompletedResponse>(&self, response: R) -> Result<R, VettedError> {
        self.accepted.check(response).map_err(|rejection| {
            warn!(
                status = rejection.status_code,
                url = rejection.url.as_deref(),
                "{rejection}"
            );
            VettedError::from(rejection)
        })
    }
}
