//! Short code generation and validation utilities.
//!
//! Generated codes are drawn uniformly from the 62-symbol alphanumeric
//! alphabet (`A-Z`, `a-z`, `0-9`). Generation knows nothing about uniqueness;
//! the store's unique-key insert decides that.

use crate::domain::error::RegistryError;
use rand::Rng;
use rand::distr::{Alphanumeric, Distribution};

/// Length of generated codes unless configured otherwise.
///
/// 62^6 gives roughly 5.6 × 10^10 possible codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Upper bound for both requested and generated codes.
pub const MAX_CODE_LENGTH: usize = 64;

/// Codes that would be shadowed by fixed routes.
const RESERVED_CODES: &[&str] = &["links", "health"];

/// Generates a code of `length` symbols from the given random source.
///
/// # Examples
///
/// ```ignore
/// let mut rng = StdRng::seed_from_u64(7);
/// let code = generate_code(&mut rng, 6);
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(Alphanumeric.sample(&mut *rng)))
        .collect()
}

/// Generates a code using the thread-local random source.
pub fn generate_random_code(length: usize) -> String {
    generate_code(&mut rand::rng(), length)
}

/// Returns true if every character belongs to the code alphabet.
pub fn is_code_alphabet(code: &str) -> bool {
    code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Returns true if `code` collides with a fixed route segment.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a caller-chosen short code.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters and digits
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`RegistryError::InvalidInput`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), RegistryError> {
    if code.is_empty() || code.len() > MAX_CODE_LENGTH {
        return Err(RegistryError::InvalidInput(format!(
            "code must be 1-{MAX_CODE_LENGTH} characters, got {}",
            code.len()
        )));
    }

    if !is_code_alphabet(code) {
        return Err(RegistryError::InvalidInput(
            "code can only contain letters and digits".to_string(),
        ));
    }

    if is_reserved_code(code) {
        return Err(RegistryError::InvalidInput(format!("code '{code}' is reserved")));
    }

    Ok(())
}
