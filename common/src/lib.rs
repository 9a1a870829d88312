//! Transport-agnostic building blocks for response validation: the outcome
//! model, the validator capability, raised failures and their serializable
//! error shapes.

mod dto;
mod error;
mod failure;
mod outcome;
mod validation;

pub use dto::{
    ClientValidationErrorDetail, ClientValidationErrorResponse, VALIDATION_FAILED_MESSAGE,
};
pub use error::{InvalidValidationCode, ValidationCode};
pub use failure::{BODY_UNAVAILABLE, RequestContext, ResponseValidationError, StatusRejection};
pub use outcome::{
    EmptyFailure, ErrorCollector, FieldErrors, ValidationErrorDetail, ValidationOutcome,
};
pub use validation::Validator;
