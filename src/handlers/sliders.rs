use axum::{
    extract::{Path, State},
    response::Json,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;
use serde_json::{json, Value};
use validator::Validate;

use crate::errors::{AppError, FormResult, Result};
use crate::models::news::News;
use crate::models::slider::{CreateSlider, Slider, UpdateSlider};
use crate::state::AppState;

fn sliders(state: &AppState) -> Collection<Slider> {
    state.db.collection("sliders")
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_data("Invalid slider ID format"))
}

pub async fn get_sliders(State(state): State<AppState>) -> Result<Json<Vec<Slider>>> {
    let cursor = sliders(&state).find(doc! { "published": true }).await?;
    let mut entries: Vec<Slider> = cursor.try_collect().await?;
    entries.sort_by_key(|s| s.display_order);
    Ok(Json(entries))
}

/// Raw slider listing with counts, used when debugging why the homepage
/// carousel is empty.
pub async fn debug_sliders(State(state): State<AppState>) -> Result<Json<Value>> {
    let cursor = sliders(&state).find(doc! {}).await?;
    let entries: Vec<Slider> = cursor.try_collect().await?;

    let published = entries.iter().filter(|s| s.published).count();
    let derived = entries.iter().filter(|s| s.source_news_id.is_some()).count();

    Ok(Json(json!({
        "total": entries.len(),
        "published": published,
        "derived_from_news": derived,
        "sliders": entries,
    })))
}

pub async fn create_slider(
    State(state): State<AppState>,
    Json(payload): Json<CreateSlider>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let slider = Slider {
        id: None,
        title: payload.title,
        subtitle: payload.subtitle,
        image: payload.image,
        link: payload.link,
        published: payload.published,
        display_order: payload.display_order,
        source_news_id: None,
        created_at: Utc::now(),
    };
    let insert = sliders(&state).insert_one(&slider).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("Slider created", id)))
}

pub async fn update_slider(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSlider>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! {};
    if let Some(title) = payload.title {
        set.insert("title", title);
    }
    if let Some(subtitle) = payload.subtitle {
        set.insert("subtitle", subtitle);
    }
    if let Some(image) = payload.image {
        set.insert("image", image);
    }
    if let Some(link) = payload.link {
        set.insert("link", link);
    }
    if let Some(published) = payload.published {
        set.insert("published", published);
    }
    if let Some(display_order) = payload.display_order {
        set.insert("display_order", display_order);
    }
    if set.is_empty() {
        return Ok(Json(FormResult::failure("Nothing to update")));
    }

    let result = sliders(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Slider updated")))
}

pub async fn delete_slider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let result = sliders(&state).delete_one(doc! { "_id": object_id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Slider deleted")))
}

/// One-shot migration: derives a slider from every published+featured news
/// article that does not already have one. Safe to re-run; existing derived
/// sliders are skipped by source_news_id.
pub async fn migrate_from_news(State(state): State<AppState>) -> Result<Json<Value>> {
    let news: Collection<News> = state.db.collection("news");
    let cursor = news
        .find(doc! { "published": true, "featured": true })
        .await?;
    let articles: Vec<News> = cursor.try_collect().await?;

    let slider_collection = sliders(&state);
    let mut created = 0usize;
    let mut skipped = 0usize;

    for article in &articles {
        let Some(article_id) = article.id else {
            skipped += 1;
            continue;
        };
        let source_id = article_id.to_hex();

        let existing = slider_collection
            .find_one(doc! { "source_news_id": &source_id })
            .await?;
        if existing.is_some() {
            skipped += 1;
            continue;
        }

        let slider = Slider {
            id: None,
            title: article.title.clone(),
            subtitle: None,
            image: article.image.clone(),
            link: Some(format!("/news/{}", source_id)),
            published: true,
            display_order: created as i32,
            source_news_id: Some(source_id),
            created_at: Utc::now(),
        };
        slider_collection.insert_one(&slider).await?;
        created += 1;
    }

    tracing::info!(
        "Slider migration: {} created, {} skipped from {} featured articles",
        created,
        skipped,
        articles.len()
    );
    Ok(Json(json!({
        "success": true,
        "created": created,
        "skipped": skipped,
        "featured_articles": articles.len(),
    })))
}
