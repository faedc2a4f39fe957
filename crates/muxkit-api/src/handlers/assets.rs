use crate::error::{ErrorEnvelope, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use muxkit_core::{ApiEnvelope, Asset};
use muxkit_vendor::{record_str, VendorRecord};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/asset/{asset_id}",
    tag = "assets",
    params(
        ("asset_id" = String, Path, description = "Vendor asset ID")
    ),
    responses(
        (status = 200, description = "Asset record", body = ApiEnvelope<Asset>),
        (status = 500, description = "Vendor call failed", body = ErrorEnvelope)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_asset"))]
pub async fn get_asset(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
) -> Result<Json<ApiEnvelope<VendorRecord>>, HttpAppError> {
    let asset = state.vendor.retrieve_asset(&asset_id).await?;

    tracing::debug!(status = record_str(&asset, "status"), "Asset status retrieved");
    Ok(Json(ApiEnvelope::ok(asset)))
}

#[utoipa::path(
    get,
    path = "/api/videos",
    tag = "assets",
    responses(
        (status = 200, description = "Assets in the vendor account", body = ApiEnvelope<Vec<Asset>>),
        (status = 500, description = "Vendor call failed", body = ErrorEnvelope)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_videos"))]
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiEnvelope<Vec<VendorRecord>>>, HttpAppError> {
    let limit = state.list_limit();
    let assets = state.vendor.list_assets(limit).await?;

    tracing::info!(count = assets.len(), limit, "Listed videos");
    Ok(Json(ApiEnvelope::ok(assets)))
}

#[utoipa::path(
    delete,
    path = "/api/asset/{asset_id}",
    tag = "assets",
    params(
        ("asset_id" = String, Path, description = "Vendor asset ID")
    ),
    responses(
        (status = 200, description = "Asset deleted; body is {success: true, message}"),
        (status = 500, description = "Vendor call failed", body = ErrorEnvelope)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_asset"))]
pub async fn delete_asset(
    State(state): State<Arc<AppState>>,
    Path(asset_id): Path<String>,
) -> Result<Json<ApiEnvelope<()>>, HttpAppError> {
    state.vendor.delete_asset(&asset_id).await?;

    tracing::info!("Asset deleted");
    Ok(Json(ApiEnvelope::message("Asset deleted successfully")))
}
