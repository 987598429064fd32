//! Catalog domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use cinedex_auth::AuthBackend;

use crate::domain::schema::CatalogSchema;
use crate::repository::CatalogStore;

/// Application state for the Catalog domain
#[derive(Clone)]
pub struct CatalogState {
    pub store: Arc<dyn CatalogStore>,
    pub schema: Arc<CatalogSchema>,
    pub auth: AuthBackend,
    /// Page size used when `page` is given without `pageSize`
    pub default_page_size: usize,
}

impl FromRef<CatalogState> for AuthBackend {
    fn from_ref(state: &CatalogState) -> Self {
        state.auth.clone()
    }
}
