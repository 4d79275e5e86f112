use async_trait::async_trait;
use serde_json::Value;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewService, Service, ServiceChanges};
use crate::filter::FilterData;

/// Collection-scoped operations on catalog entries.
///
/// Implementations must be safe for concurrent use; a single instance is
/// shared by every request. Each write touches at most one document.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    /// Entries matching `query.where_clause`, sorted, skipped and limited.
    async fn find(&self, query: FilterData) -> Result<Vec<Service>, DatabaseError>;

    /// Number of entries matching the filter, ignoring pagination.
    async fn count(&self, where_clause: Option<Value>) -> Result<i64, DatabaseError>;

    async fn find_one(&self, id: &str) -> Result<Option<Service>, DatabaseError>;

    /// Persists the entry, stamping `created_at` with store time.
    async fn insert(&self, service: NewService) -> Result<Service, DatabaseError>;

    /// Returns whether an entry with `id` was matched.
    async fn update(&self, id: &str, changes: ServiceChanges) -> Result<bool, DatabaseError>;

    /// Returns whether an entry with `id` was removed.
    async fn delete(&self, id: &str) -> Result<bool, DatabaseError>;
}
