use axum::extract::FromRef;

use crate::config::AppConfig;
use crate::database::ServiceRepository;

/// Bounds applied while validating list parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListLimits {
    pub max_page_size: Option<i64>,
}

/// Shared per-process state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub repository: ServiceRepository,
    pub limits: ListLimits,
}

impl AppState {
    pub fn new(repository: ServiceRepository, limits: ListLimits) -> Self {
        Self { repository, limits }
    }
}

impl From<&AppConfig> for ListLimits {
    fn from(config: &AppConfig) -> Self {
        Self { max_page_size: config.api.max_page_size }
    }
}

impl FromRef<AppState> for ServiceRepository {
    fn from_ref(input: &AppState) -> Self {
        input.repository.clone()
    }
}

impl FromRef<AppState> for ListLimits {
    fn from_ref(input: &AppState) -> Self {
        input.limits
    }
}
