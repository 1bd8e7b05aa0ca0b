//! Classification of sqlx errors at the store boundary.

use crate::domain::error::StoreError;

/// Name of the unique constraint guarding `links.code`.
pub const LINKS_CODE_CONSTRAINT: &str = "links_code_key";

pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(LINKS_CODE_CONSTRAINT))
}

/// Maps an insert failure to [`StoreError::Conflict`] when the code constraint
/// rejected it, and to [`StoreError::Backend`] otherwise.
pub fn map_insert_error(e: sqlx::Error, code: &str) -> StoreError {
    if is_unique_violation_on_code(&e) {
        StoreError::Conflict(code.to_string())
    } else {
        StoreError::backend(e)
    }
}
