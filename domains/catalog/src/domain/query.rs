//! Query compiler
//!
//! Turns untrusted `?q=&sortBy=&order=` parameters into a validated
//! [`QuerySpec`] against a [`CatalogSchema`]. Compilation is pure: the same
//! input and schema always produce the same spec.

use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use cinedex_common::Error;

use super::entities::CatalogItem;
use super::schema::CatalogSchema;

/// The only order token that selects ascending
const ASCENDING_TOKEN: &str = "asc";

/// Raw list parameters exactly as the client sent them
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Invalid sort field")]
    InvalidSortField(String),
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        Error::Validation(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Ascending only for the exact `asc` token; anything else is descending
    pub fn from_order_token(order: Option<&str>) -> Self {
        match order {
            Some(ASCENDING_TOKEN) => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    pub fn sql_keyword(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Case-insensitive substring match over any of `fields`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter {
    /// Lower-cased search text
    pub needle: String,
    pub fields: Vec<String>,
}

impl TextFilter {
    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.fields.iter().any(|field| {
            item.field(field)
                .and_then(|value| searchable_text(&value))
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

/// Text form of a scalar value; containers and nulls are not searchable
fn searchable_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Order two field values. Missing and null values sort last in both
    /// directions; mixed types order string < number < boolean < array < object.
    pub fn compare(&self, a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let a = a.filter(|v| !v.is_null());
        let b = b.filter(|v| !v.is_null());

        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ordering = compare_present(a, b);
                match self.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::String(_) => 1,
        Value::Number(_) => 2,
        Value::Bool(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Validated, compiled representation of a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySpec {
    pub filter: Option<TextFilter>,
    /// `None` means the store's natural (insertion) order
    pub sort: Option<SortSpec>,
}

impl QuerySpec {
    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter.matches(item))
    }
}

/// Compile raw list parameters against `schema`.
///
/// Parameters are taken verbatim: only an absent or empty value means "no
/// filter" or "no sort". An unknown sort field, including one padded with
/// whitespace, is always rejected. An order token without a sort field is
/// accepted and has no effect.
pub fn compile(raw: &RawQuery, schema: &CatalogSchema) -> Result<QuerySpec, QueryError> {
    let filter = raw
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(|q| TextFilter {
            needle: q.to_lowercase(),
            fields: schema.searchable_fields().map(str::to_string).collect(),
        });

    let sort = match raw.sort_by.as_deref() {
        None | Some("") => None,
        Some(field) if schema.is_sortable(field) => Some(SortSpec {
            field: field.to_string(),
            direction: SortDirection::from_order_token(raw.order.as_deref()),
        }),
        Some(field) => {
            tracing::debug!(sort_by = %field, "Rejected sort field outside allow-list");
            return Err(QueryError::InvalidSortField(field.to_string()));
        }
    };

    Ok(QuerySpec { filter, sort })
}
