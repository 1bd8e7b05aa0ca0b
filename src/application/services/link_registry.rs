//! Link creation, resolution, and removal.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::error::{CodePolicyError, RegistryError, StoreError};
use crate::domain::repositories::LinkStore;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, generate_random_code, is_reserved_code,
    validate_custom_code,
};
use tracing::{debug, info, warn};

/// Bounds for the generate-and-insert loop used when no code is requested.
///
/// After `attempts_per_length` consecutive collisions the code length grows
/// by one. Once `max_length` has also been exhausted, creation fails instead
/// of looping forever.
///
/// Bounds always satisfy `1 <= initial_length <= max_length <= 64` and
/// `attempts_per_length >= 1`, so every generated code is a valid code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePolicy {
    initial_length: usize,
    max_length: usize,
    attempts_per_length: usize,
}

impl CodePolicy {
    /// Checks the bounds and builds a policy.
    ///
    /// # Errors
    ///
    /// Returns [`CodePolicyError`] if a length is zero or above
    /// [`MAX_CODE_LENGTH`], if `max_length < initial_length`, or if
    /// `attempts_per_length` is zero.
    pub fn new(
        initial_length: usize,
        max_length: usize,
        attempts_per_length: usize,
    ) -> Result<Self, CodePolicyError> {
        if initial_length == 0 {
            return Err(CodePolicyError::ZeroLength);
        }
        if max_length < initial_length {
            return Err(CodePolicyError::MaxBelowInitial {
                initial: initial_length,
                max: max_length,
            });
        }
        if max_length > MAX_CODE_LENGTH {
            return Err(CodePolicyError::MaxTooLong {
                max: max_length,
                limit: MAX_CODE_LENGTH,
            });
        }
        if attempts_per_length == 0 {
            return Err(CodePolicyError::ZeroAttempts);
        }

        Ok(Self {
            initial_length,
            max_length,
            attempts_per_length,
        })
    }

    pub fn initial_length(&self) -> usize {
        self.initial_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn attempts_per_length(&self) -> usize {
        self.attempts_per_length
    }
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self {
            initial_length: DEFAULT_CODE_LENGTH,
            max_length: 12,
            attempts_per_length: 5,
        }
    }
}

/// Orchestrates code generation and the link store.
///
/// Holds no shared state besides the store handle: uniqueness and click
/// counting rest entirely on the store's atomic primitives, and every
/// operation is a single store round trip (generated-code creation issues one
/// insert per candidate).
pub struct LinkRegistry<S: LinkStore + ?Sized> {
    store: Arc<S>,
    policy: CodePolicy,
}

impl<S: LinkStore + ?Sized> LinkRegistry<S> {
    /// Creates a registry with the default code policy.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, CodePolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: CodePolicy) -> Self {
        Self { store, policy }
    }

    /// Creates a link for `original_url`.
    ///
    /// An empty `requested_code` is treated the same as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidInput`] if `original_url` is empty or the
    /// requested code is malformed.
    ///
    /// Returns [`RegistryError::CodeConflict`] if the requested code is taken.
    /// No retry happens in that case.
    ///
    /// Returns [`RegistryError::CodeSpaceExhausted`] if every generated
    /// candidate collided up to the policy's maximum length.
    pub async fn create(
        &self,
        original_url: String,
        requested_code: Option<String>,
    ) -> Result<Link, RegistryError> {
        if original_url.is_empty() {
            return Err(RegistryError::InvalidInput("originalUrl is required".to_string()));
        }

        match requested_code.filter(|code| !code.is_empty()) {
            Some(code) => {
                validate_custom_code(&code)?;

                let link = self
                    .store
                    .insert_unique(NewLink { code, original_url })
                    .await?;

                info!(code = %link.code, id = link.id, "Created link with requested code");
                Ok(link)
            }
            None => self.create_with_generated_code(original_url).await,
        }
    }

    /// Generates candidates until the store accepts one.
    ///
    /// The insert is the uniqueness check; nothing is looked up beforehand.
    async fn create_with_generated_code(
        &self,
        original_url: String,
    ) -> Result<Link, RegistryError> {
        let mut length = self.policy.initial_length;
        let mut collisions_at_length = 0;
        let mut attempts = 0;

        loop {
            let code = generate_random_code(length);
            attempts += 1;

            if !is_reserved_code(&code) {
                let new_link = NewLink {
                    code,
                    original_url: original_url.clone(),
                };

                match self.store.insert_unique(new_link).await {
                    Ok(link) => {
                        info!(code = %link.code, id = link.id, attempts, "Created link");
                        return Ok(link);
                    }
                    Err(StoreError::Conflict(code)) => {
                        debug!(%code, length, "Generated code collided");
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            collisions_at_length += 1;

            if collisions_at_length >= self.policy.attempts_per_length {
                if length >= self.policy.max_length {
                    warn!(attempts, max_length = length, "Code space exhausted");
                    return Err(RegistryError::CodeSpaceExhausted {
                        attempts,
                        max_length: self.policy.max_length,
                    });
                }

                length += 1;
                collisions_at_length = 0;
                info!(
                    length,
                    "Escalating generated code length after repeated collisions"
                );
            }
        }
    }

    /// Resolves `code`: increments its click counter, stamps the click time,
    /// and returns the updated link in one atomic store call.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no live link owns `code`. Nothing
    /// is created or mutated in that case.
    pub async fn resolve(&self, code: &str) -> Result<Link, RegistryError> {
        self.store
            .increment_and_fetch(code)
            .await?
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    /// Read-only lookup. Never touches `clicks`.
    pub async fn get(&self, code: &str) -> Result<Link, RegistryError> {
        self.store
            .find_by_code(code)
            .await?
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    /// All live links, newest first.
    pub async fn list(&self) -> Result<Vec<Link>, RegistryError> {
        Ok(self.store.list().await?)
    }

    /// Removes the link owning `code`, freeing the code for reuse.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no link owns `code`.
    pub async fn delete(&self, code: &str) -> Result<(), RegistryError> {
        if self.store.delete(code).await? {
            info!(%code, "Deleted link");
            Ok(())
        } else {
            Err(RegistryError::NotFound(code.to_string()))
        }
    }

    /// Checks store reachability.
    pub async fn health_check(&self) -> Result<(), RegistryError> {
        Ok(self.store.ping().await?)
    }
}
