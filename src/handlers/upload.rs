use axum::{extract::State, response::Json};
use axum_extra::extract::Multipart;
use bytes::Bytes;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::state::AppState;

const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB
const DEFAULT_FOLDER: &str = "clubsite";

/// Admin image upload: multipart in, Cloudinary URL out. The image never
/// touches local disk.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let cloudinary = state.cloudinary.as_deref().ok_or_else(|| {
        AppError::ServiceUnavailable("Image hosting not configured".to_string())
    })?;

    let mut image: Option<Bytes> = None;
    let mut folder = DEFAULT_FOLDER.to_string();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("image") | Some("file") => {
                image = Some(field.bytes().await?);
            }
            Some("folder") => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    folder = value;
                }
            }
            _ => {}
        }
    }

    let image = image.ok_or(AppError::NoImageProvided)?;
    if image.len() > MAX_IMAGE_SIZE {
        return Err(AppError::ImageTooLarge);
    }
    match infer::get(&image) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {}
        _ => return Err(AppError::InvalidImageFormat),
    }

    let public_id = Uuid::new_v4().to_string();
    let (secure_url, public_id) = cloudinary
        .upload_image(&image, &folder, Some(&public_id))
        .await?;

    tracing::info!("Uploaded image {} to folder {}", public_id, folder);
    Ok(Json(json!({
        "success": true,
        "url": secure_url,
        "public_id": public_id,
        "thumbnail": cloudinary.thumbnail_url(&public_id, 300, 300),
    })))
}
