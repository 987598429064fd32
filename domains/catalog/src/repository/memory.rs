//! In-memory catalog store
//!
//! Keeps items in insertion order, which is the natural order for unsorted
//! queries. Sorting is stable, so ties keep insertion order too.

use cinedex_common::RepositoryError;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::domain::entities::CatalogItem;
use crate::domain::query::QuerySpec;

#[derive(Default)]
pub struct InMemoryCatalogStore {
    items: RwLock<Vec<CatalogItem>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn find(&self, spec: &QuerySpec) -> Result<Vec<CatalogItem>, RepositoryError> {
        let items = self.items.read().await;
        let matching = items.iter().filter(|item| spec.matches(item)).cloned();

        let Some(sort) = &spec.sort else {
            return Ok(matching.collect());
        };

        // Extract each sort key once before sorting
        let mut keyed: Vec<_> = matching.map(|item| (item.field(&sort.field), item)).collect();
        keyed.sort_by(|(a, _), (b, _)| sort.compare(a.as_ref(), b.as_ref()));

        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<CatalogItem>, RepositoryError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn insert(&self, item: CatalogItem) -> Result<CatalogItem, RepositoryError> {
        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, item: CatalogItem) -> Result<Option<CatalogItem>, RepositoryError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() != before)
    }

    async fn clear(&self) -> Result<u64, RepositoryError> {
        let mut items = self.items.write().await;
        let removed = items.len() as u64;
        items.clear();
        Ok(removed)
    }
}
