//! Image upload for profile photos and resume thumbnails.
//!
//! Files land in S3 (MinIO locally) under `uploads/{user_id}/{uuid}.{ext}`;
//! the returned key is what clients store on the resume's `thumbnail_key`.

use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::middleware::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
}

/// POST /api/v1/uploads/image
///
/// Accepts a single multipart file field (png or jpeg, ≤ 5 MiB) and stores
/// it under the caller's prefix.
pub async fn handle_upload_image(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.file_name().is_none() {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let extension = extension_for_content_type(&content_type)?;

        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        check_upload_size(data.len())?;

        let key = format!("uploads/{}/{}.{extension}", user.id, Uuid::new_v4());
        state
            .s3
            .put_object()
            .bucket(&state.config.s3_bucket)
            .key(&key)
            .content_type(&content_type)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| AppError::S3(format!("Upload failed: {e}")))?;

        tracing::info!("Stored image {} ({} bytes) for user {}", key, data.len(), user.id);

        let url = format!(
            "{}/{}/{key}",
            state.config.s3_endpoint.trim_end_matches('/'),
            state.config.s3_bucket
        );
        return Ok(Json(UploadResponse { key, url }));
    }

    Err(AppError::Validation(
        "Request contained no file field".to_string(),
    ))
}

fn extension_for_content_type(content_type: &str) -> Result<&'static str, AppError> {
    match content_type {
        "image/png" => Ok("png"),
        "image/jpeg" => Ok("jpg"),
        other => Err(AppError::Validation(format!(
            "Unsupported image type '{other}' — use image/png or image/jpeg"
        ))),
    }
}

fn check_upload_size(len: usize) -> Result<(), AppError> {
    if len == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if len > MAX_IMAGE_BYTES {
        return Err(AppError::Validation(format!(
            "Image exceeds the {} MiB limit",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for_content_type("image/png").unwrap(), "png");
        assert_eq!(extension_for_content_type("image/jpeg").unwrap(), "jpg");
        assert!(extension_for_content_type("image/gif").is_err());
        assert!(extension_for_content_type("").is_err());
    }

    #[test]
    fn test_size_limits() {
        assert!(check_upload_size(1).is_ok());
        assert!(check_upload_size(MAX_IMAGE_BYTES).is_ok());
        assert!(check_upload_size(MAX_IMAGE_BYTES + 1).is_err());
        assert!(check_upload_size(0).is_err());
    }
}
