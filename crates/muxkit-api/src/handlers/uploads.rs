use crate::error::{ErrorEnvelope, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use muxkit_core::{ApiEnvelope, CreateUploadRequest, Upload};
use muxkit_vendor::{record_str, VendorRecord};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/create-upload",
    tag = "uploads",
    responses(
        (status = 200, description = "Direct upload created", body = ApiEnvelope<Upload>),
        (status = 500, description = "Vendor call failed", body = ErrorEnvelope)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "create_upload"))]
pub async fn create_upload(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiEnvelope<VendorRecord>>, HttpAppError> {
    tracing::info!("Creating upload URL");

    let request = CreateUploadRequest::public(state.upload_cors_origin());
    let upload = state.vendor.create_upload(&request).await?;

    tracing::info!(upload_id = record_str(&upload, "id"), "Upload URL created");
    Ok(Json(ApiEnvelope::ok(upload)))
}

#[utoipa::path(
    get,
    path = "/api/upload/{upload_id}",
    tag = "uploads",
    params(
        ("upload_id" = String, Path, description = "Vendor upload ID")
    ),
    responses(
        (status = 200, description = "Upload record; asset_id is set once processing started", body = ApiEnvelope<Upload>),
        (status = 500, description = "Vendor call failed", body = ErrorEnvelope)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_upload"))]
pub async fn get_upload(
    State(state): State<Arc<AppState>>,
    Path(upload_id): Path<String>,
) -> Result<Json<ApiEnvelope<VendorRecord>>, HttpAppError> {
    let upload = state.vendor.retrieve_upload(&upload_id).await?;

    tracing::debug!(
        status = record_str(&upload, "status"),
        asset_id = record_str(&upload, "asset_id"),
        "Upload status retrieved"
    );
    Ok(Json(ApiEnvelope::ok(upload)))
}
