use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::database::{ServiceRepository, ServiceUpdate};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, MessageResponse};

/// PUT /services/:id - replaces name, description and versions in one filtered update
pub async fn update(
    State(repository): State<ServiceRepository>,
    Path(id): Path<String>,
    payload: Result<Json<ServiceUpdate>, JsonRejection>,
) -> ApiResult<MessageResponse> {
    let Json(input) = payload?;

    if !repository.update(&id, input.into_changes()).await? {
        return Err(ApiError::not_found("Service not found"));
    }

    tracing::info!("Updated service {}", id);
    Ok(ApiResponse::success(MessageResponse::new("Service updated successfully")))
}
