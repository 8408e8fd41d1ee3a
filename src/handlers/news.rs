use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;
use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, FormResult, Result};
use crate::models::news::{CreateNews, CreateVideo, News, UpdateNews, UpdateVideo, Video};
use crate::state::AppState;

fn news(state: &AppState) -> Collection<News> {
    state.db.collection("news")
}

fn videos(state: &AppState) -> Collection<Video> {
    state.db.collection("videos")
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_data("Invalid ID format"))
}

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub featured: Option<bool>,
    /// Admin listings pass all=true to see unpublished records too.
    pub all: Option<bool>,
}

pub async fn get_news(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<News>>> {
    let mut filter = doc! {};
    if !query.all.unwrap_or(false) {
        filter.insert("published", true);
    }
    if let Some(featured) = query.featured {
        filter.insert("featured", featured);
    }

    let cursor = news(&state).find(filter).await?;
    let mut articles: Vec<News> = cursor.try_collect().await?;
    articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(articles))
}

pub async fn get_news_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<News>> {
    let object_id = parse_id(&id)?;
    news(&state)
        .find_one(doc! { "_id": object_id })
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

pub async fn create_news(
    State(state): State<AppState>,
    Json(payload): Json<CreateNews>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let now = Utc::now();
    let article = News {
        id: None,
        title: payload.title,
        body: payload.body,
        image: payload.image,
        published: payload.published,
        featured: payload.featured,
        created_at: now,
        updated_at: now,
    };
    let insert = news(&state).insert_one(&article).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("News article created", id)))
}

pub async fn update_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateNews>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! { "updated_at": bson::DateTime::from_chrono(Utc::now()) };
    if let Some(title) = payload.title {
        set.insert("title", title);
    }
    if let Some(body) = payload.body {
        set.insert("body", body);
    }
    if let Some(image) = payload.image {
        set.insert("image", image);
    }
    if let Some(published) = payload.published {
        set.insert("published", published);
    }
    if let Some(featured) = payload.featured {
        set.insert("featured", featured);
    }

    let result = news(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("News article updated")))
}

pub async fn delete_news(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let result = news(&state).delete_one(doc! { "_id": object_id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("News article deleted")))
}

// ========== VIDEOS ==========

pub async fn get_videos(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<Video>>> {
    let mut filter = doc! {};
    if !query.all.unwrap_or(false) {
        filter.insert("published", true);
    }
    if let Some(featured) = query.featured {
        filter.insert("featured", featured);
    }

    let cursor = videos(&state).find(filter).await?;
    let mut clips: Vec<Video> = cursor.try_collect().await?;
    clips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(clips))
}

pub async fn create_video(
    State(state): State<AppState>,
    Json(payload): Json<CreateVideo>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let clip = Video {
        id: None,
        title: payload.title,
        url: payload.url,
        published: payload.published,
        featured: payload.featured,
        created_at: Utc::now(),
    };
    let insert = videos(&state).insert_one(&clip).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("Video created", id)))
}

pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateVideo>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! {};
    if let Some(title) = payload.title {
        set.insert("title", title);
    }
    if let Some(url) = payload.url {
        set.insert("url", url);
    }
    if let Some(published) = payload.published {
        set.insert("published", published);
    }
    if let Some(featured) = payload.featured {
        set.insert("featured", featured);
    }
    if set.is_empty() {
        return Ok(Json(FormResult::failure("Nothing to update")));
    }

    let result = videos(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Video updated")))
}

pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let result = videos(&state).delete_one(doc! { "_id": object_id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Video deleted")))
}
