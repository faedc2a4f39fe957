use crate::error::HttpAppError;
use axum::Json;
use muxkit_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;

/// Liveness banner served at `/`
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusBanner {
    pub message: String,
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Server is running", body = StatusBanner)
    )
)]
pub async fn root() -> Json<StatusBanner> {
    Json(StatusBanner {
        message: "Mux Backend Server is running!".to_string(),
        status: "OK".to_string(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpAppError {
    HttpAppError(AppError::NotFound("Route not found".to_string()))
}
