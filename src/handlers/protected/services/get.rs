use axum::extract::{Path, State};

use crate::database::{Service, ServiceRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /services/:id
pub async fn get(
    State(repository): State<ServiceRepository>,
    Path(id): Path<String>,
) -> ApiResult<Service> {
    match repository.find_one(&id).await? {
        Some(service) => Ok(ApiResponse::success(service)),
        None => Err(ApiError::not_found("Service not found")),
    }
}
