//! Error types for the store seam and the registry seam.

use thiserror::Error;

/// Failure reported by a [`crate::domain::repositories::LinkStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique-key insert was rejected because a live link already owns the code.
    #[error("code '{0}' is already taken")]
    Conflict(String),

    /// The backend is unreachable or returned an unexpected error.
    #[error("store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps any backend error.
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// Outcome kinds of a registry operation.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("code '{0}' is already taken")]
    CodeConflict(String),

    #[error("no link with code '{0}'")]
    NotFound(String),

    /// Every candidate up to the maximum code length collided.
    #[error("gave up generating a code after {attempts} attempts (max length {max_length})")]
    CodeSpaceExhausted { attempts: usize, max_length: usize },

    #[error(transparent)]
    Store(StoreError),
}

/// Rejected [`crate::application::services::CodePolicy`] bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodePolicyError {
    #[error("initial code length must be at least 1")]
    ZeroLength,

    #[error("maximum code length {max} is shorter than the initial length {initial}")]
    MaxBelowInitial { initial: usize, max: usize },

    #[error("maximum code length {max} exceeds the limit of {limit}")]
    MaxTooLong { max: usize, limit: usize },

    #[error("attempts per length must be at least 1")]
    ZeroAttempts,
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(code) => Self::CodeConflict(code),
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_conflict_becomes_code_conflict() {
        let err: RegistryError = StoreError::Conflict("promo".to_string()).into();
        assert!(matches!(err, RegistryError::CodeConflict(ref c) if c == "promo"));
    }

    #[test]
    fn test_backend_error_stays_opaque_store_failure() {
        let io = std::io::Error::other("connection refused");
        let err: RegistryError = StoreError::backend(io).into();

        assert!(matches!(err, RegistryError::Store(StoreError::Backend(_))));
        assert!(err.to_string().contains("connection refused"));
    }
}
