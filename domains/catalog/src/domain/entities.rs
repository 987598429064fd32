//! Catalog item entity
//!
//! Items are schema-agnostic documents with three fixed members: a unique
//! `id`, a non-empty `title` and a numeric `rating`. Every other field is
//! carried as-is in `attributes` and serialized flat next to them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use cinedex_common::{Error, RepositoryError, Result};

/// Keys that identify a record and are never taken from a request body
const IDENTITY_KEYS: &[&str] = &["id", "_id"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: Uuid,
    pub title: String,
    pub rating: f64,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl CatalogItem {
    /// Build an item from untrusted request fields.
    ///
    /// Identity keys in `fields` are ignored; `id` is always the caller's.
    pub fn from_fields(id: Uuid, mut fields: Map<String, Value>) -> Result<Self> {
        for key in IDENTITY_KEYS {
            fields.remove(*key);
        }

        let title = match fields.remove("title") {
            Some(Value::String(title)) if !title.trim().is_empty() => title.trim().to_string(),
            Some(Value::String(_)) | None | Some(Value::Null) => {
                return Err(Error::Validation("title is required".to_string()))
            }
            Some(_) => return Err(Error::Validation("title must be a string".to_string())),
        };

        let rating = match fields.remove("rating") {
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|r| r.is_finite())
                .ok_or_else(|| Error::Validation("rating must be a number".to_string()))?,
            None | Some(Value::Null) => {
                return Err(Error::Validation("rating is required".to_string()))
            }
            Some(_) => return Err(Error::Validation("rating must be a number".to_string())),
        };

        Ok(Self {
            id,
            title,
            rating,
            attributes: fields,
        })
    }

    /// Apply a partial update: supplied fields overwrite, the rest are kept.
    /// The merged result is validated like a new item.
    pub fn merge(&self, patch: Map<String, Value>) -> Result<Self> {
        let mut fields = self.document();
        for (key, value) in patch {
            fields.insert(key, value);
        }
        Self::from_fields(self.id, fields)
    }

    /// Value of `name` as the query engine sees it
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.to_string())),
            "title" => Some(Value::String(self.title.clone())),
            "rating" => serde_json::Number::from_f64(self.rating).map(Value::Number),
            other => self.attributes.get(other).cloned(),
        }
    }

    /// Stored document: every field except `id`
    pub fn document(&self) -> Map<String, Value> {
        let mut document = self.attributes.clone();
        document.insert("title".to_string(), Value::String(self.title.clone()));
        if let Some(rating) = serde_json::Number::from_f64(self.rating) {
            document.insert("rating".to_string(), Value::Number(rating));
        }
        document
    }

    /// Rebuild an item from a stored document
    pub fn from_document(id: Uuid, document: Value) -> std::result::Result<Self, RepositoryError> {
        match document {
            Value::Object(fields) => Self::from_fields(id, fields).map_err(|e| {
                tracing::error!(item_id = %id, error = %e, "Stored catalog document is invalid");
                RepositoryError::InvalidData(format!("catalog item {}: {}", id, e))
            }),
            _ => Err(RepositoryError::InvalidData(format!(
                "catalog item {}: document is not an object",
                id
            ))),
        }
    }
}
