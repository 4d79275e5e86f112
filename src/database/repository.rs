use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewService, Service, ServiceChanges};
use crate::database::store::ServiceStore;
use crate::filter::FilterData;

/// Handle to the services collection given to request handlers.
///
/// Cloning is cheap: every clone shares the same store. Each call is bounded
/// by `timeout` and is never retried.
#[derive(Clone)]
pub struct ServiceRepository {
    store: Arc<dyn ServiceStore>,
    timeout: Duration,
}

impl ServiceRepository {
    pub fn new(store: Arc<dyn ServiceStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn find(&self, query: FilterData) -> Result<Vec<Service>, DatabaseError> {
        self.bounded("find", self.store.find(query)).await
    }

    pub async fn count(&self, where_clause: Option<Value>) -> Result<i64, DatabaseError> {
        self.bounded("count", self.store.count(where_clause)).await
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<Service>, DatabaseError> {
        self.bounded("find_one", self.store.find_one(id)).await
    }

    pub async fn insert(&self, service: NewService) -> Result<Service, DatabaseError> {
        self.bounded("insert", self.store.insert(service)).await
    }

    pub async fn update(&self, id: &str, changes: ServiceChanges) -> Result<bool, DatabaseError> {
        self.bounded("update", self.store.update(id, changes)).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        self.bounded("delete", self.store.delete(id)).await
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, DatabaseError>
    where
        F: Future<Output = Result<T, DatabaseError>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!("Store {} abandoned after {:?}", operation, self.timeout);
                Err(DatabaseError::Timeout(self.timeout))
            }
        }
    }
}
