//! API handlers for Bookbay REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::{error::AppError, AppState};

/// Header carrying the client's API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Extractor gating a handler behind the API key check.
///
/// Runs before the handler body, so a missing or invalid key is rejected
/// with 401 without touching the database or the mirror.
pub struct ApiKey;

#[async_trait]
impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let api_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing API key".to_string()))?;

        if !state.services.auth.verify(api_key) {
            return Err(AppError::Authentication("Invalid API key".to_string()));
        }

        Ok(ApiKey)
    }
}
