//! Handlers for link management endpoints (list, create, get, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every live link, newest first.
///
/// # Endpoint
///
/// `GET /links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.registry.list().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://example.com",
///   "code": "promo"   // optional, generated when absent or empty
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `originalUrl` is missing or empty, the code is
/// malformed, or the body is not valid JSON.
/// Returns 409 Conflict if the requested code is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .registry
        .create(payload.original_url.unwrap_or_default(), payload.code)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Returns one link without counting a click.
///
/// # Endpoint
///
/// `GET /links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link owns the code.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.registry.get(&code).await?;

    Ok(Json(link.into()))
}

/// Permanently removes a link. The code becomes available again.
///
/// # Endpoint
///
/// `DELETE /links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link owns the code.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.registry.delete(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
