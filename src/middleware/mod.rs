pub mod auth;
pub mod response;

pub use auth::{auth_gate_middleware, AuthGate, CredentialVerifier, JwtVerifier};
pub use response::{ApiResponse, ApiResult, MessageResponse};
