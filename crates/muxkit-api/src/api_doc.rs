//! OpenAPI documentation, served at `/api/openapi.json` and browsable at `/docs`.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use muxkit_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "muxkit proxy API",
        version = "0.1.0",
        description = "Pass-through proxy for the Mux Video API: direct upload creation, upload and asset status, listing, and deletion. Every route answers with {success, data | message | error}."
    ),
    paths(
        handlers::root::root,
        handlers::uploads::create_upload,
        handlers::uploads::get_upload,
        handlers::assets::get_asset,
        handlers::assets::list_videos,
        handlers::assets::delete_asset,
    ),
    components(schemas(
        handlers::root::StatusBanner,
        error::ErrorEnvelope,
        models::Upload,
        models::UploadStatus,
        models::UploadFailure,
        models::NewAssetSettings,
        models::Asset,
        models::AssetStatus,
        models::PlaybackId,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "uploads", description = "Direct uploads"),
        (name = "assets", description = "Processed video assets"),
    )
)]
pub struct ApiDoc;
