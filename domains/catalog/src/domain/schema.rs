//! Catalog schema descriptor
//!
//! One deployment-level allow-list of which item fields may be searched and
//! which may be sorted on. Parsed from a compact descriptor such as
//! `title:search+sort,crew:search,rating:sort`.

use std::sync::LazyLock;

use thiserror::Error;

/// Regex for validating field names (compiled once)
static FIELD_NAME_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").expect("field name regex is valid")
});

/// Field names that cannot be configured
const RESERVED_FIELDS: &[&str] = &["id", "_id"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("schema descriptor is empty")]
    Empty,

    #[error("invalid field name: {0:?}")]
    InvalidFieldName(String),

    #[error("field {0:?} is reserved")]
    ReservedField(String),

    #[error("field {0:?} is declared twice")]
    DuplicateField(String),

    #[error("field {field:?} has unknown capability {capability:?}")]
    UnknownCapability { field: String, capability: String },

    #[error("field {0:?} declares no capability")]
    NoCapability(String),
}

/// What a field may be used for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldCapabilities {
    pub searchable: bool,
    pub sortable: bool,
}

impl FieldCapabilities {
    pub const SEARCH: Self = Self {
        searchable: true,
        sortable: false,
    };
    pub const SORT: Self = Self {
        searchable: false,
        sortable: true,
    };
    pub const SEARCH_AND_SORT: Self = Self {
        searchable: true,
        sortable: true,
    };
}

/// Ordered field → capabilities map. Declaration order is kept so the
/// compiled filter is identical for identical configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSchema {
    fields: Vec<(String, FieldCapabilities)>,
}

impl CatalogSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any earlier declaration of the same name
    pub fn with_field(mut self, name: impl Into<String>, caps: FieldCapabilities) -> Self {
        let name = name.into();
        self.fields.retain(|(existing, _)| *existing != name);
        self.fields.push((name, caps));
        self
    }

    /// The movie schema: free text over title, full title and crew;
    /// sorting by title, rating, year and rank.
    pub fn movies() -> Self {
        Self::new()
            .with_field("title", FieldCapabilities::SEARCH_AND_SORT)
            .with_field("fullTitle", FieldCapabilities::SEARCH)
            .with_field("crew", FieldCapabilities::SEARCH)
            .with_field("rating", FieldCapabilities::SORT)
            .with_field("year", FieldCapabilities::SORT)
            .with_field("rank", FieldCapabilities::SORT)
    }

    /// Parse a descriptor: comma-separated `name:cap[+cap]` entries where
    /// `cap` is `search` or `sort`.
    pub fn parse(descriptor: &str) -> Result<Self, SchemaError> {
        let mut schema = Self::new();

        for entry in descriptor.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, caps_str) = entry.split_once(':').unwrap_or((entry, ""));
            let name = name.trim();

            if !FIELD_NAME_REGEX.is_match(name) {
                return Err(SchemaError::InvalidFieldName(name.to_string()));
            }
            if RESERVED_FIELDS.contains(&name) {
                return Err(SchemaError::ReservedField(name.to_string()));
            }
            if schema.capabilities(name).is_some() {
                return Err(SchemaError::DuplicateField(name.to_string()));
            }

            let mut caps = FieldCapabilities::default();
            for capability in caps_str.split('+').map(str::trim).filter(|c| !c.is_empty()) {
                match capability {
                    "search" => caps.searchable = true,
                    "sort" => caps.sortable = true,
                    other => {
                        return Err(SchemaError::UnknownCapability {
                            field: name.to_string(),
                            capability: other.to_string(),
                        })
                    }
                }
            }
            if caps == FieldCapabilities::default() {
                return Err(SchemaError::NoCapability(name.to_string()));
            }

            schema.fields.push((name.to_string(), caps));
        }

        if schema.fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        Ok(schema)
    }

    pub fn capabilities(&self, field: &str) -> Option<FieldCapabilities> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, caps)| *caps)
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.capabilities(field).is_some_and(|caps| caps.sortable)
    }

    /// Searchable fields in declaration order
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, caps)| caps.searchable)
            .map(|(name, _)| name.as_str())
    }

    /// Sortable fields in declaration order
    pub fn sortable_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, caps)| caps.sortable)
            .map(|(name, _)| name.as_str())
    }
}
