use std::sync::Arc;

use vetted_common::ValidationOutcome;

use crate::registry::{ValidatorLookup, ValidatorNotRegistered, ValidatorRegistry};

/// Runs the validator registered for a parsed body's type.
///
/// The outcome is returned exactly as the validator produced it.
#[derive(Debug)]
pub struct Dispatcher<L = ValidatorRegistry> {
    lookup: Arc<L>,
}

impl<L> Clone for Dispatcher<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<L: ValidatorLookup> Dispatcher<L> {
    #[must_use]
    pub const fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }

    #[must_use]
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn dispatch<T: 'static>(
        &self,
        value: T,
    ) -> Result<ValidationOutcome<T>, ValidatorNotRegistered> {
        let validator = self
            .lookup
            .lookup::<T>()
            .ok_or_else(ValidatorNotRegistered::of::<T>)?;
        Ok(validator.validate(value))
    }
}
