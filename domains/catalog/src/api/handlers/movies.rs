//! Movie catalog API handlers
//!
//! Reads are public. Every write goes through [`AdminUser`], so an
//! unauthenticated caller gets 401 and a non-admin caller gets 403 before
//! the body is even looked at.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use cinedex_auth::AdminUser;
use cinedex_common::{Error, Pagination, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::api::middleware::CatalogState;
use crate::domain::entities::CatalogItem;
use crate::domain::query::{compile, RawQuery};

const NOT_FOUND_MESSAGE: &str = "Movie not found";

/// Confirmation body for deletes
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Unknown or unparsable ids are indistinguishable to the caller
fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::NotFound(NOT_FOUND_MESSAGE.to_string()))
}

fn query_rejection(rejection: QueryRejection) -> Error {
    Error::Validation(rejection.body_text())
}

fn json_body(
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Map<String, Value>> {
    body.map(|Json(fields)| fields)
        .map_err(|e| Error::Validation(e.body_text()))
}

/// List movies, optionally filtered, sorted and paged
pub async fn list_movies(
    State(state): State<CatalogState>,
    raw: std::result::Result<Query<RawQuery>, QueryRejection>,
    pagination: std::result::Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<CatalogItem>>> {
    let Query(raw) = raw.map_err(query_rejection)?;
    let Query(pagination) = pagination.map_err(query_rejection)?;

    let spec = compile(&raw, &state.schema)?;
    let items = state.store.find(&spec).await?;

    Ok(Json(pagination.apply(items, state.default_page_size)))
}

/// Get a single movie by ID
pub async fn get_movie(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<CatalogItem>> {
    let id = parse_id(&id)?;

    let item = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    Ok(Json(item))
}

/// Create a movie (admin only)
pub async fn create_movie(
    AdminUser(ctx): AdminUser,
    State(state): State<CatalogState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<CatalogItem>)> {
    let item = CatalogItem::from_fields(Uuid::new_v4(), json_body(body)?)?;
    let created = state.store.insert(item).await?;

    tracing::info!(
        movie_id = %created.id,
        admin_id = %ctx.user_id(),
        "Movie created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Partially update a movie (admin only). Supplied fields overwrite, the
/// rest are kept.
pub async fn update_movie(
    AdminUser(ctx): AdminUser,
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<CatalogItem>> {
    let id = parse_id(&id)?;
    let patch = json_body(body)?;

    let existing = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    let updated = state
        .store
        .update(existing.merge(patch)?)
        .await?
        .ok_or_else(|| Error::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

    tracing::info!(movie_id = %id, admin_id = %ctx.user_id(), "Movie updated");

    Ok(Json(updated))
}

/// Delete a movie (admin only)
pub async fn delete_movie(
    AdminUser(ctx): AdminUser,
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    if !state.store.delete(id).await? {
        return Err(Error::NotFound(NOT_FOUND_MESSAGE.to_string()));
    }

    tracing::info!(movie_id = %id, admin_id = %ctx.user_id(), "Movie deleted");

    Ok(Json(MessageResponse {
        message: "Movie deleted successfully".to_string(),
    }))
}
