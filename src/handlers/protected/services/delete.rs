use axum::extract::{Path, State};

use crate::database::ServiceRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, MessageResponse};

/// DELETE /services/:id
pub async fn delete(
    State(repository): State<ServiceRepository>,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    if !repository.delete(&id).await? {
        return Err(ApiError::not_found("Service not found"));
    }

    tracing::info!("Deleted service {}", id);
    Ok(ApiResponse::success(MessageResponse::new("Service deleted successfully")))
}
