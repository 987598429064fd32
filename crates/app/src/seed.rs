//! Catalog seeding
//!
//! Loads IMDb-style movie records from a local file or URL, normalises them
//! into catalog items, and replaces the catalog contents.

use anyhow::{bail, Context};
use cinedex_catalog::{CatalogItem, CatalogStore};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

/// Public top-250 dataset used when no source is given
pub const DEFAULT_SOURCE: &str =
    "https://gist.githubusercontent.com/pjbelo/c5e28dbb7a8fea6713a2fd74f1cd80ae/raw/top250movies.json";

/// Key the dataset nests its records under
const NESTED_KEY: &str = "top250movies";

/// Source key → catalog key
const RENAMED_FIELDS: &[(&str, &str)] = &[
    ("id", "imdbId"),
    ("imDbRating", "rating"),
    ("imDbRatingCount", "ratingCount"),
];

/// Fields whose numeric strings become numbers
const NUMERIC_FIELDS: &[&str] = &["rank", "year", "rating", "ratingCount"];

/// Read the raw JSON document from `source` (http(s) URL or file path)
pub async fn fetch_source(source: &str) -> anyhow::Result<Value> {
    if source.starts_with("http://") || source.starts_with("https://") {
        tracing::info!(source = %source, "Downloading seed data");
        let response = reqwest::get(source)
            .await
            .context("Seed download failed")?
            .error_for_status()
            .context("Seed source returned an error status")?;
        return response.json().await.context("Seed source is not JSON");
    }

    tracing::info!(source = %source, "Reading seed file");
    let raw = tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Cannot read seed file {}", source))?;
    serde_json::from_str(&raw).context("Seed file is not JSON")
}

/// Pull the record array out of a document: either a bare array or one
/// nested under `top250movies`
pub fn records(document: Value) -> anyhow::Result<Vec<Map<String, Value>>> {
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut wrapper) => match wrapper.remove(NESTED_KEY) {
            Some(Value::Array(items)) => items,
            _ => bail!("Invalid movie data format"),
        },
        _ => bail!("Invalid movie data format"),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            _ => bail!("Record {} is not an object", index),
        })
        .collect()
}

/// Rename source keys and coerce numeric strings. A blank numeric string
/// (an unrated film) becomes 0.
pub fn normalize_record(mut record: Map<String, Value>) -> Map<String, Value> {
    for (from, to) in RENAMED_FIELDS {
        if let Some(value) = record.remove(*from) {
            record.insert((*to).to_string(), value);
        }
    }

    for field in NUMERIC_FIELDS {
        if let Some(Value::String(raw)) = record.get(*field) {
            if let Some(number) = parse_number(raw) {
                record.insert((*field).to_string(), Value::Number(number));
            }
        }
    }

    record
}

fn parse_number(raw: &str) -> Option<Number> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Number::from(0));
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Turn a source document into catalog items with fresh ids.
///
/// Records that still fail validation after normalisation are logged and
/// skipped; only a malformed document fails the whole seed.
pub fn prepare_items(document: Value) -> anyhow::Result<Vec<CatalogItem>> {
    let items = records(document)?
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            match CatalogItem::from_fields(Uuid::new_v4(), normalize_record(record)) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping invalid seed record");
                    None
                }
            }
        })
        .collect();

    Ok(items)
}

/// Replace the catalog with `items`. Returns (removed, inserted).
pub async fn replace_catalog(
    store: &dyn CatalogStore,
    items: Vec<CatalogItem>,
) -> anyhow::Result<(u64, usize)> {
    let removed = store.clear().await.context("Clearing catalog failed")?;
    tracing::info!(removed, "Old catalog items removed");

    let total = items.len();
    for item in items {
        store.insert(item).await.context("Inserting catalog item failed")?;
    }

    Ok((removed, total))
}
