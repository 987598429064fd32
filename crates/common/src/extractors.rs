//! Custom axum extractors for Cinedex

use std::ops::Range;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::Error;

/// Maximum page size for list endpoints
const MAX_PAGE_SIZE: i64 = 100;

/// Page query parameters for list endpoints (`?page=&pageSize=`)
///
/// Slicing is applied by the handler to the already filtered and ordered
/// result set. When neither parameter is present the full set is returned.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl Pagination {
    /// Whether the caller asked for a page at all
    pub fn is_requested(&self) -> bool {
        self.page.is_some() || self.page_size.is_some()
    }

    /// Get the 1-based page index. Anything below 1 is treated as 1.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1) as usize
    }

    /// Get the page size, defaulting to `default_size`, clamped to 1..=100
    pub fn page_size(&self, default_size: usize) -> usize {
        self.page_size
            .unwrap_or(default_size as i64)
            .clamp(1, MAX_PAGE_SIZE) as usize
    }

    /// Slice `items` down to the requested page
    pub fn apply<T>(&self, mut items: Vec<T>, default_size: usize) -> Vec<T> {
        if !self.is_requested() {
            return items;
        }

        let range = page_bounds(items.len(), self.page(), self.page_size(default_size));
        items.truncate(range.end);
        items.drain(..range.start);
        items
    }
}

/// Index range of a 1-based `page` over `len` items, clamped to `[0, len]`.
///
/// A page past the end yields an empty range rather than an error.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size);
    start.min(len)..end.min(len)
}

/// JSON extractor that validates the deserialized value automatically.
///
/// Replaces `Json<T>` + manual `.validate()` calls in handlers.
/// Requires `T: DeserializeOwned + Validate`.
///
/// All input errors (deserialization + validation) return 400.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for `ValidatedJson`:
/// - JSON deserialization errors → 400 (via `Error::Validation`)
/// - Validation errors → 400 (via `Error::Validation`)
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Validation(Error),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedJsonRejection::Json(e) => Error::Validation(e.body_text()).into_response(),
            ValidatedJsonRejection::Validation(e) => e.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value.validate().map_err(|e| {
            ValidatedJsonRejection::Validation(Error::Validation(format!(
                "Validation failed: {}",
                e
            )))
        })?;
        Ok(ValidatedJson(value))
    }
}
