use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewService, Service, ServiceChanges};
use crate::database::store::ServiceStore;
use crate::filter::{FilterData, FilterOrder, FilterWhere};

/// In-process store keyed by id. Used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryServiceStore {
    services: RwLock<BTreeMap<String, Service>>,
}

impl MemoryServiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `services` as-is, timestamps included.
    pub fn with_services(services: impl IntoIterator<Item = Service>) -> Self {
        let map = services.into_iter().map(|s| (s.id.clone(), s)).collect();
        Self { services: RwLock::new(map) }
    }

    fn matching<'a>(
        services: &'a BTreeMap<String, Service>,
        where_clause: Option<&Value>,
    ) -> Result<Vec<&'a Service>, DatabaseError> {
        let Some(where_clause) = where_clause else {
            return Ok(services.values().collect());
        };
        let mut out = Vec::new();
        for service in services.values() {
            let document = serde_json::to_value(service)
                .map_err(|e| DatabaseError::QueryError(e.to_string()))?;
            if FilterWhere::matches(where_clause, &document)? {
                out.push(service);
            }
        }
        Ok(out)
    }

    fn compare_column(column: &str, a: &Service, b: &Service) -> Ordering {
        match column {
            "name" => a.name.cmp(&b.name),
            "description" => a.description.cmp(&b.description),
            "created_at" => a.created_at.cmp(&b.created_at),
            _ => a.id.cmp(&b.id),
        }
    }
}

#[async_trait]
impl ServiceStore for MemoryServiceStore {
    async fn find(&self, query: FilterData) -> Result<Vec<Service>, DatabaseError> {
        FilterOrder::validate(&query.order)?;
        if let Some(unknown) = query
            .order
            .iter()
            .find(|o| !matches!(o.column.as_str(), "id" | "name" | "description" | "created_at"))
        {
            return Err(DatabaseError::QueryError(format!("cannot sort on column {}", unknown.column)));
        }
        let skip = usize::try_from(query.offset.unwrap_or(0))
            .map_err(|_| DatabaseError::QueryError("Offset must be non-negative".to_string()))?;
        let limit = match query.limit {
            Some(l) => usize::try_from(l)
                .map_err(|_| DatabaseError::QueryError("Limit must be non-negative".to_string()))?,
            None => usize::MAX,
        };

        let services = self.services.read().await;
        let mut found = Self::matching(&services, query.where_clause.as_ref())?;
        found.sort_by(|a, b| FilterOrder::compare(&query.order, *a, *b, Self::compare_column));

        Ok(found.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn count(&self, where_clause: Option<Value>) -> Result<i64, DatabaseError> {
        let services = self.services.read().await;
        Ok(Self::matching(&services, where_clause.as_ref())?.len() as i64)
    }

    async fn find_one(&self, id: &str) -> Result<Option<Service>, DatabaseError> {
        Ok(self.services.read().await.get(id).cloned())
    }

    async fn insert(&self, service: NewService) -> Result<Service, DatabaseError> {
        let mut services = self.services.write().await;
        if services.contains_key(&service.id) {
            return Err(DatabaseError::QueryError(format!("duplicate key: {}", service.id)));
        }
        let created = Service::from_new(service, Utc::now());
        services.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: ServiceChanges) -> Result<bool, DatabaseError> {
        match self.services.write().await.get_mut(id) {
            Some(service) => {
                service.apply(changes);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.services.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{contains_pattern, FilterOrderInfo, SortDirection};
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn service(id: &str, name: &str, description: &str, minute: u32) -> Service {
        Service {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            versions: vec!["1.0".to_string()],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap(),
        }
    }

    fn store() -> MemoryServiceStore {
        MemoryServiceStore::with_services([
            service("a", "Gamma", "payments", 3),
            service("b", "Alpha", "Billing engine", 1),
            service("c", "Beta", "search", 2),
        ])
    }

    fn names(found: &[Service]) -> Vec<&str> {
        found.iter().map(|s| s.name.as_str()).collect()
    }

    #[tokio::test]
    async fn sorts_skips_and_limits() {
        let store = store();
        let found = store
            .find(FilterData {
                order: vec![FilterOrderInfo::new("name", SortDirection::Asc)],
                limit: Some(2),
                offset: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Beta", "Gamma"]);

        let found = store
            .find(FilterData {
                order: vec![FilterOrderInfo::new("created_at", SortDirection::Desc)],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Gamma", "Beta", "Alpha"]);
    }

    #[tokio::test]
    async fn search_filter_matches_name_or_description() {
        let store = store();
        let filter = json!({
            "$or": [
                { "name": { "$ilike": contains_pattern("BILL") } },
                { "description": { "$ilike": contains_pattern("BILL") } }
            ]
        });
        let found = store
            .find(FilterData { where_clause: Some(filter.clone()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Alpha"]);
        assert_eq!(store.count(Some(filter)).await.unwrap(), 1);
        assert_eq!(store.count(None).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn insert_stamps_created_at_and_rejects_duplicates() {
        let store = MemoryServiceStore::new();
        let before = Utc::now() - Duration::milliseconds(1);
        let new = NewService {
            id: "x".to_string(),
            name: "X".to_string(),
            description: String::new(),
            versions: vec![],
        };
        let created = store.insert(new.clone()).await.unwrap();
        assert!(created.created_at >= before);
        assert!(store.insert(new).await.is_err());
    }

    #[tokio::test]
    async fn update_and_delete_report_matches() {
        let store = store();
        let changes = ServiceChanges { name: "Renamed".to_string(), description: String::new(), versions: vec![] };
        assert!(!store.update("missing", changes.clone()).await.unwrap());
        assert!(store.update("a", changes).await.unwrap());
        assert_eq!(store.find_one("a").await.unwrap().unwrap().name, "Renamed");

        assert!(store.delete("a").await.unwrap());
        assert!(!store.delete("a").await.unwrap());
        assert!(store.find_one("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_unknown_sort_columns() {
        let err = store()
            .find(FilterData {
                order: vec![FilterOrderInfo::new("versions", SortDirection::Asc)],
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::QueryError(_)));
    }
}
