use axum::extract::{rejection::QueryRejection, Query, State};
use serde::Serialize;

use crate::database::{Service, ServiceRepository};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::ListLimits;

use super::params::{ListParams, ListQuery};

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub data: Vec<Service>,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    pub total: i64,
}

/// GET /services - one page of entries plus the unpaginated match count
///
/// The page and the count are two independent store reads, so `total` can
/// drift from the page under concurrent writes.
pub async fn list(
    State(repository): State<ServiceRepository>,
    State(limits): State<ListLimits>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<ListResponse> {
    let Query(query) = query?;
    let params = ListParams::parse(query, limits)?;

    let data = repository.find(params.to_filter_data()).await?;
    let total = repository.count(params.filter()).await?;

    Ok(ApiResponse::success(ListResponse {
        data,
        page: params.page,
        page_size: params.page_size,
        total,
    }))
}
