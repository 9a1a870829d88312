use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use vetted_common::Validator;

/// Resolves the validator registered for a body type.
pub trait ValidatorLookup: Send + Sync {
    fn lookup<T: 'static>(&self) -> Option<Arc<dyn Validator<T>>>;
}

/// Raised when a body type has no validator. This is a setup defect in the
/// calling code, never a statement about the response content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no validator registered for type {type_name}")]
pub struct ValidatorNotRegistered {
    pub type_name: &'static str,
}

impl ValidatorNotRegistered {
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self {
            type_name: type_name::<T>(),
        }
    }
}

struct Entry {
    type_name: &'static str,
    // Always an `Arc<dyn Validator<T>>` for the `T` of its key.
    validator: Box<dyn Any + Send + Sync>,
}

/// Validators keyed by body type.
///
/// Populated through [`ValidatorRegistryBuilder`] and frozen afterwards, so a
/// shared registry is read without locking.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<TypeId, Entry>,
}

impl ValidatorRegistry {
    #[must_use]
    pub fn builder() -> ValidatorRegistryBuilder {
        ValidatorRegistryBuilder::default()
    }

    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.validators.contains_key(&TypeId::of::<T>())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl ValidatorLookup for ValidatorRegistry {
    fn lookup<T: 'static>(&self) -> Option<Arc<dyn Validator<T>>> {
        self.validators
            .get(&TypeId::of::<T>())?
            .validator
            .downcast_ref::<Arc<dyn Validator<T>>>()
            .cloned()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.validators.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        f.debug_struct("ValidatorRegistry")
            .field("types", &names)
            .finish()
    }
}

#[derive(Default)]
pub struct ValidatorRegistryBuilder {
    validators: HashMap<TypeId, Entry>,
}

impl ValidatorRegistryBuilder {
    /// Registers `validator` for `T`, replacing any earlier registration.
    #[must_use]
    pub fn register<T, V>(self, validator: V) -> Self
    where
        T: 'static,
        V: Validator<T> + 'static,
    {
        self.register_shared::<T>(Arc::new(validator))
    }

    #[must_use]
    pub fn register_shared<T: 'static>(mut self, validator: Arc<dyn Validator<T>>) -> Self {
        let name = type_name::<T>();
        let previous = self.validators.insert(
            TypeId::of::<T>(),
            Entry {
                type_name: name,
                validator: Box::new(validator),
            },
        );
        if previous.is_some() {
            tracing::debug!(type_name = name, "Replacing registered validator");
        }
        self
    }

    #[must_use]
    pub fn build(self) -> ValidatorRegistry {
        ValidatorRegistry {
            validators: self.validators,
        }
    }
}
