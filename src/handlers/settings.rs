use axum::{
    extract::{Path, State},
    response::Json,
};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_bson};
use mongodb::options::UpdateOptions;
use mongodb::Collection;

use crate::errors::{AppError, FormResult, Result};
use crate::models::settings::{SetSetting, Setting};
use crate::state::AppState;

fn settings(state: &AppState) -> Collection<Setting> {
    state.db.collection("settings")
}

pub async fn get_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Setting>> {
    settings(&state)
        .find_one(doc! { "key": &key })
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

pub async fn list_settings(State(state): State<AppState>) -> Result<Json<Vec<Setting>>> {
    let cursor = settings(&state).find(doc! {}).await?;
    let all: Vec<Setting> = cursor.try_collect().await?;
    Ok(Json(all))
}

/// Upsert by key; the key carries a unique index so concurrent upserts of the
/// same key collapse to one document.
pub async fn set_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(payload): Json<SetSetting>,
) -> Result<Json<FormResult>> {
    if key.trim().is_empty() {
        return Ok(Json(FormResult::failure("Setting key must not be empty")));
    }

    let value = to_bson(&payload.value).map_err(|e| AppError::invalid_data(e.to_string()))?;
    settings(&state)
        .update_one(
            doc! { "key": &key },
            doc! { "$set": { "key": &key, "value": value } },
        )
        .with_options(UpdateOptions::builder().upsert(true).build())
        .await?;

    tracing::info!("Setting '{}' updated", key);
    Ok(Json(FormResult::ok("Setting saved")))
}

pub async fn delete_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<FormResult>> {
    let result = settings(&state).delete_one(doc! { "key": &key }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Setting deleted")))
}
