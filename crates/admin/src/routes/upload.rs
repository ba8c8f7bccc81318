//! Image upload proxy to ImgBB.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::services::{UploadError, UploadedImage};
use crate::state::AppState;

/// Multipart field carrying the file.
const IMAGE_FIELD: &str = "image";

/// Largest accepted upload (ImgBB's own limit is 32 MB).
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/upload-image", post(upload_image))
        .layer(axum::extract::DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// POST /api/upload-image
#[instrument(skip(state, _admin, multipart))]
async fn upload_image(
    _admin: RequireAdminAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadedImage>> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid upload: {e}")))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Invalid upload: {e}")))?;
            image = Some(bytes);
            break;
        }
    }

    let image = image.ok_or(UploadError::NoImage)?;
    tracing::debug!(bytes = image.len(), "Forwarding image to ImgBB");
    Ok(Json(state.imgbb().upload(&image).await?))
}
