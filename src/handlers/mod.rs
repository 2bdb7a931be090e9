// src/handlers/mod.rs

pub mod lead;
pub mod leaderboard;
pub mod plan;
pub mod profile;
pub mod quiz;

use axum::Json;
use serde::Serialize;

use crate::error::AppError;

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

pub fn respond<T: Serialize>(message: impl Into<String>, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: message.into(),
        data,
    })
}

/// Method fallback for routes that exist but not for the requested verb.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Router fallback for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
