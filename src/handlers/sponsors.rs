use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use mongodb::Collection;
use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, FormResult, Result};
use crate::models::sponsor::{CreateSponsorLogo, SponsorLogo, SponsorTier, UpdateSponsorLogo};
use crate::state::AppState;

fn sponsors(state: &AppState) -> Collection<SponsorLogo> {
    state.db.collection("sponsor_logos")
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_data("Invalid sponsor ID format"))
}

#[derive(Debug, Deserialize)]
pub struct SponsorQuery {
    pub tier: Option<SponsorTier>,
}

pub async fn get_sponsors(
    State(state): State<AppState>,
    Query(query): Query<SponsorQuery>,
) -> Result<Json<Vec<SponsorLogo>>> {
    let mut filter = doc! { "published": true };
    if let Some(tier) = query.tier {
        filter.insert(
            "tier",
            to_bson(&tier).map_err(|e| AppError::invalid_data(e.to_string()))?,
        );
    }

    let cursor = sponsors(&state).find(filter).await?;
    let logos: Vec<SponsorLogo> = cursor.try_collect().await?;
    Ok(Json(logos))
}

pub async fn create_sponsor(
    State(state): State<AppState>,
    Json(payload): Json<CreateSponsorLogo>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let logo = SponsorLogo {
        id: None,
        name: payload.name,
        image_url: payload.image_url,
        public_id: payload.public_id,
        tier: payload.tier,
        website: payload.website,
        published: payload.published,
        created_at: Utc::now(),
    };
    let insert = sponsors(&state).insert_one(&logo).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("Sponsor logo created", id)))
}

pub async fn update_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSponsorLogo>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! {};
    if let Some(name) = payload.name {
        set.insert("name", name);
    }
    if let Some(image_url) = payload.image_url {
        set.insert("image_url", image_url);
    }
    if let Some(public_id) = payload.public_id {
        set.insert("public_id", public_id);
    }
    if let Some(tier) = payload.tier {
        set.insert(
            "tier",
            to_bson(&tier).map_err(|e| AppError::invalid_data(e.to_string()))?,
        );
    }
    if let Some(website) = payload.website {
        set.insert("website", website);
    }
    if let Some(published) = payload.published {
        set.insert("published", published);
    }
    if set.is_empty() {
        return Ok(Json(FormResult::failure("Nothing to update")));
    }

    let result = sponsors(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Sponsor logo updated")))
}

/// Removes the database record first; the hosted image delete is best-effort
/// and a CDN failure does not restore the record.
pub async fn delete_sponsor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let collection = sponsors(&state);

    let logo = collection
        .find_one(doc! { "_id": object_id })
        .await?
        .ok_or(AppError::DocumentNotFound)?;

    collection.delete_one(doc! { "_id": object_id }).await?;

    if let (Some(public_id), Some(cloudinary)) = (&logo.public_id, &state.cloudinary) {
        if let Err(e) = cloudinary.delete_image(public_id).await {
            tracing::warn!(
                "Sponsor logo {} deleted from database but Cloudinary delete of {} failed: {}",
                id,
                public_id,
                e
            );
        }
    }

    Ok(Json(FormResult::ok("Sponsor logo deleted")))
}
