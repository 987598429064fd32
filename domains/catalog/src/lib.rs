//! Catalog domain: schema descriptor, query compiler, catalog stores, movie API

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::CatalogItem;
pub use domain::query::{
    compile, QueryError, QuerySpec, RawQuery, SortDirection, SortSpec, TextFilter,
};
pub use domain::schema::{CatalogSchema, FieldCapabilities, SchemaError};

// Re-export repository types
pub use repository::{CatalogStore, InMemoryCatalogStore, PgCatalogStore};

// Re-export API types
pub use api::routes;
pub use api::CatalogState;
