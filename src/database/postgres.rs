use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::info;

use crate::database::collection::{Collection, SERVICE_COLUMNS, SERVICE_TEXT_COLUMNS};
use crate::database::manager::DatabaseError;
use crate::database::models::{NewService, Service, ServiceChanges};
use crate::database::query_builder::QueryBuilder;
use crate::database::store::ServiceStore;
use crate::filter::FilterData;

/// Postgres-backed store: one row per entry in `service_catalog.services`.
#[derive(Clone)]
pub struct PgServiceStore {
    pool: PgPool,
    collection: Collection,
}

impl PgServiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, collection: Collection::services() }
    }

    /// Creates the namespace and collection when missing.
    pub async fn ensure_collection(&self) -> Result<(), DatabaseError> {
        let create_schema = format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", self.collection.namespace);
        sqlx::query(&create_schema).execute(&self.pool).await?;

        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                versions TEXT[] NOT NULL DEFAULT '{{}}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )",
            self.collection.qualified()
        );
        sqlx::query(&create_table).execute(&self.pool).await?;

        info!("Collection {} ready", self.collection.qualified());
        Ok(())
    }

    fn query(&self) -> Result<QueryBuilder<Service>, DatabaseError> {
        QueryBuilder::<Service>::new(&self.collection)?
            .select(SERVICE_COLUMNS)?
            .text_columns(SERVICE_TEXT_COLUMNS)
    }
}

#[async_trait]
impl ServiceStore for PgServiceStore {
    async fn find(&self, query: FilterData) -> Result<Vec<Service>, DatabaseError> {
        self.query()?.filter(query)?.select_all(&self.pool).await
    }

    async fn count(&self, where_clause: Option<Value>) -> Result<i64, DatabaseError> {
        self.query()?
            .filter(FilterData { where_clause, ..Default::default() })?
            .count(&self.pool)
            .await
    }

    async fn find_one(&self, id: &str) -> Result<Option<Service>, DatabaseError> {
        self.query()?
            .filter(FilterData {
                where_clause: Some(json!({ "id": id })),
                limit: Some(1),
                ..Default::default()
            })?
            .select_optional(&self.pool)
            .await
    }

    async fn insert(&self, service: NewService) -> Result<Service, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (id, name, description, versions, created_at)
             VALUES ($1, $2, $3, $4, now())
             RETURNING {}",
            self.collection.qualified(),
            SERVICE_COLUMNS.join(", ")
        );
        let row = sqlx::query_as::<_, Service>(&sql)
            .bind(&service.id)
            .bind(&service.name)
            .bind(&service.description)
            .bind(&service.versions)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: &str, changes: ServiceChanges) -> Result<bool, DatabaseError> {
        let sql = format!(
            "UPDATE {} SET name = $2, description = $3, versions = $4 WHERE id = $1",
            self.collection.qualified()
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(&changes.versions)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.collection.qualified());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
