use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::protected::services;
use crate::middleware::AuthGate;
use crate::state::AppState;

/// Full application router: catalog routes behind the gate, plus CORS and tracing.
pub fn app(state: AppState, gate: &AuthGate, cors: CorsLayer) -> Router {
    gate.protect(service_routes())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn service_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/services",
            get(services::service_list).post(services::service_create),
        )
        .route(
            "/services/:id",
            get(services::service_get)
                .put(services::service_update)
                .delete(services::service_delete),
        )
}

/// Permissive when `origins` is empty; otherwise only the listed origins.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}
