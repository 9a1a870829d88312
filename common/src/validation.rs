use crate::ValidationOutcome;

/// Validation rules for a parsed response body of type `T`:
/// 1. The body is deserialized into `T` (serde only checks shape)
/// 2. The validator inspects the value and reports every violated rule
///
/// Validators must not mutate or coerce the value; a passing value comes back
/// unchanged inside [`ValidationOutcome::Success`].
pub trait Validator<T>: Send + Sync {
    fn validate(&self, value: T) -> ValidationOutcome<T>;
}

impl<T, F> Validator<T> for F
where
    F: Fn(T) -> ValidationOutcome<T> + Send + Sync,
{
    fn validate(&self, value: T) -> ValidationOutcome<T> {
        self(value)
    }
}
