use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::sync::Arc;

use crate::auth::validate_jwt;
use crate::error::ApiError;

/// Boolean credential check consulted by the gate.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, token: &str) -> bool;
}

/// Accepts HS256 bearer tokens signed with the configured secret.
pub struct JwtVerifier {
    secret: String,
}

impl JwtVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl CredentialVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> bool {
        match validate_jwt(token, &self.secret) {
            Ok(claims) => {
                tracing::debug!("Authenticated subject {}", claims.sub);
                true
            }
            Err(e) => {
                tracing::debug!("Credential rejected: {}", e);
                false
            }
        }
    }
}

/// Request interceptor that rejects unauthenticated requests before any handler runs.
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthGate {
    pub fn new(verifier: impl CredentialVerifier + 'static) -> Self {
        Self { verifier: Arc::new(verifier) }
    }

    pub fn jwt(secret: impl Into<String>) -> Self {
        Self::new(JwtVerifier::new(secret))
    }

    /// Puts every route of `router`, and its fallback, behind the gate.
    pub fn protect<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(self.clone(), auth_gate_middleware))
    }

    fn check(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let token = extract_bearer_token(headers).map_err(ApiError::unauthorized)?;
        if self.verifier.verify(&token) {
            Ok(())
        } else {
            Err(ApiError::unauthorized("Invalid or expired credential"))
        }
    }
}

pub async fn auth_gate_middleware(
    State(gate): State<AuthGate>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate.check(&headers)?;
    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}
