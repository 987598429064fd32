//! Catalog store implementations
//!
//! The store executes a compiled [`QuerySpec`]; it never sees raw request
//! parameters.

pub mod items;
pub mod memory;

use cinedex_common::RepositoryError;
use uuid::Uuid;

use crate::domain::entities::CatalogItem;
use crate::domain::query::QuerySpec;

pub use items::PgCatalogStore;
pub use memory::InMemoryCatalogStore;

#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// All items matching `spec`, in the spec's order (natural order when unsorted)
    async fn find(&self, spec: &QuerySpec) -> Result<Vec<CatalogItem>, RepositoryError>;

    async fn get(&self, id: Uuid) -> Result<Option<CatalogItem>, RepositoryError>;

    /// Insert a new item. Fails with `AlreadyExists` on a duplicate id.
    async fn insert(&self, item: CatalogItem) -> Result<CatalogItem, RepositoryError>;

    /// Replace a stored item. `None` when the id no longer exists.
    async fn update(&self, item: CatalogItem) -> Result<Option<CatalogItem>, RepositoryError>;

    /// Delete by id. `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Remove every item, returning how many were removed
    async fn clear(&self) -> Result<u64, RepositoryError>;
}
