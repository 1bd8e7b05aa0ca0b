//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::{debug, error};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code through the registry, which counts the click and
///    stamps the click time in the same store call
/// 2. Return 302 Found with `Location` set to the destination
///
/// Nothing is retried and no fallback is attempted.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error on store failures, or if the stored
/// destination cannot be carried in a `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.registry.resolve(&code).await?;
    debug!(%code, clicks = link.clicks, "Resolved short link");

    let location = HeaderValue::from_str(&link.original_url).map_err(|e| {
        error!(%code, error = %e, "Destination is not a valid Location header");
        AppError::internal("Internal Server Error", json!({}))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
