use axum::extract::{rejection::JsonRejection, State};
use axum::Json;
use uuid::Uuid;

use crate::database::{Service, ServiceInput, ServiceRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /services - id and created_at are always assigned server-side
pub async fn create(
    State(repository): State<ServiceRepository>,
    payload: Result<Json<ServiceInput>, JsonRejection>,
) -> ApiResult<Service> {
    let Json(input) = payload?;
    input.validate().map_err(ApiError::bad_request)?;

    let new = input.into_new(Uuid::new_v4().to_string());
    let service = repository.insert(new).await?;

    tracing::info!("Created service {}", service.id);
    Ok(ApiResponse::created(service))
}
