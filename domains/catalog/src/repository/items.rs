//! Postgres catalog store
//!
//! Items live in one JSONB document table so any deployment schema fits:
//! `catalog_items (id UUID PK, seq BIGSERIAL, document JSONB NOT NULL,
//! created_at TIMESTAMPTZ, updated_at TIMESTAMPTZ)`. `seq` provides the
//! natural (insertion) order.
//!
//! Field names from the compiled spec are always bound as parameters; only
//! the sort keyword is written into the SQL text.

use cinedex_common::RepositoryError;
use serde_json::Value;
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::CatalogStore;
use crate::domain::entities::CatalogItem;
use crate::domain::query::QuerySpec;

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    document: Json<Value>,
}

impl ItemRow {
    fn into_item(self) -> Result<CatalogItem, RepositoryError> {
        CatalogItem::from_document(self.id, self.document.0)
    }
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the SELECT for a compiled spec
fn build_find_query(spec: &QuerySpec) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT id, document FROM catalog_items");

    if let Some(filter) = &spec.filter {
        qb.push(" WHERE (");
        if filter.fields.is_empty() {
            qb.push("FALSE");
        }
        for (i, field) in filter.fields.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push("(jsonb_typeof(document -> ")
                .push_bind(field.clone())
                .push(") IN ('string', 'number', 'boolean') AND strpos(lower(document ->> ")
                .push_bind(field.clone())
                .push("), ")
                .push_bind(filter.needle.clone())
                .push(") > 0)");
        }
        qb.push(")");
    }

    qb.push(" ORDER BY ");
    if let Some(sort) = &spec.sort {
        qb.push("NULLIF(document -> ")
            .push_bind(sort.field.clone())
            .push(", 'null'::jsonb) ")
            .push(sort.direction.sql_keyword())
            .push(" NULLS LAST, ");
    }
    qb.push("seq ASC");

    qb
}

#[async_trait::async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find(&self, spec: &QuerySpec) -> Result<Vec<CatalogItem>, RepositoryError> {
        let rows: Vec<ItemRow> = build_find_query(spec)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ItemRow::into_item).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<CatalogItem>, RepositoryError> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT id, document
            FROM catalog_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ItemRow::into_item).transpose()
    }

    async fn insert(&self, item: CatalogItem) -> Result<CatalogItem, RepositoryError> {
        let row: ItemRow = sqlx::query_as(
            r#"
            INSERT INTO catalog_items (id, document, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id, document
            "#,
        )
        .bind(item.id)
        .bind(Json(Value::Object(item.document())))
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_insert)?;

        row.into_item()
    }

    async fn update(&self, item: CatalogItem) -> Result<Option<CatalogItem>, RepositoryError> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            UPDATE catalog_items SET
                document = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, document
            "#,
        )
        .bind(item.id)
        .bind(Json(Value::Object(item.document())))
        .fetch_optional(&self.pool)
        .await?;

        row.map(ItemRow::into_item).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM catalog_items")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
