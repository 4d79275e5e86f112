#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use service_catalog::auth::{generate_jwt, Claims};
use service_catalog::database::{MemoryServiceStore, Service, ServiceRepository, ServiceStore};
use service_catalog::middleware::AuthGate;
use service_catalog::routes;
use service_catalog::state::{AppState, ListLimits};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub token: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(&self.token)
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(&self.token)
    }

    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.put(self.url(path)).bearer_auth(&self.token)
    }

    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(&self.token)
    }
}

/// Serves the app in-process over a fresh memory store seeded with `services`.
pub async fn spawn_server(services: Vec<Service>) -> Result<TestServer> {
    spawn_with_store(Arc::new(MemoryServiceStore::with_services(services))).await
}

pub async fn spawn_with_store(store: Arc<dyn ServiceStore>) -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let repository = ServiceRepository::new(store, Duration::from_secs(10));
    let state = AppState::new(repository, ListLimits::default());
    let app = routes::app(state, &AuthGate::jwt(TEST_SECRET), routes::cors_layer(&[]));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server");
    });

    let token = generate_jwt(&Claims::new("integration-tests", 1)?, TEST_SECRET)?;
    Ok(TestServer { port, base_url, token, client: reqwest::Client::new() })
}

pub fn service(id: &str, name: &str, description: &str) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        versions: vec!["1.0".to_string()],
        created_at: chrono::Utc::now(),
    }
}
