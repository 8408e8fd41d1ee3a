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

use crate::dtos::fixture_view::{
    group_by_month, result_views, upcoming_views, FixtureFilter, MonthGroup, ResultView,
};
use crate::errors::{AppError, FormResult, Result};
use crate::models::fixture::{
    CreateFixture, CreateTimelineEvent, Fixture, FixtureStatus, ScoreUpdate, StatusUpdate,
    UpdateFixture,
};
use crate::state::AppState;

fn fixtures_collection(state: &AppState) -> Collection<Fixture> {
    state.db.collection("fixtures")
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_data("Invalid fixture ID format"))
}

#[derive(Debug, Deserialize)]
pub struct FixtureQuery {
    pub status: Option<String>,
    pub season: Option<String>,
    pub competition: Option<String>,
}

pub async fn get_fixtures(
    State(state): State<AppState>,
    Query(query): Query<FixtureQuery>,
) -> Result<Json<Vec<Fixture>>> {
    let mut filter = doc! {};
    if let Some(status) = &query.status {
        filter.insert("status", status);
    }
    if let Some(season) = &query.season {
        filter.insert("season", season);
    }
    if let Some(competition) = &query.competition {
        filter.insert("competition", competition);
    }

    let cursor = fixtures_collection(&state).find(filter).await?;
    let mut fixtures: Vec<Fixture> = cursor.try_collect().await?;
    fixtures.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));

    tracing::debug!("Fetched {} fixtures", fixtures.len());
    Ok(Json(fixtures))
}

/// Future SCHEDULED fixtures matching the page filters, grouped by calendar
/// month of the match date.
pub async fn get_upcoming(
    State(state): State<AppState>,
    Query(filter): Query<FixtureFilter>,
) -> Result<Json<Vec<MonthGroup>>> {
    let cursor = fixtures_collection(&state)
        .find(doc! { "status": FixtureStatus::Scheduled.as_str() })
        .await?;
    let fixtures: Vec<Fixture> = cursor.try_collect().await?;

    let today = Utc::now().date_naive();
    let views = upcoming_views(&fixtures, &filter, today);
    Ok(Json(group_by_month(views)))
}

/// Completed fixtures with win/draw/loss outcomes, newest first.
pub async fn get_results(State(state): State<AppState>) -> Result<Json<Vec<ResultView>>> {
    let cursor = fixtures_collection(&state)
        .find(doc! { "status": FixtureStatus::Ft.as_str() })
        .await?;
    let fixtures: Vec<Fixture> = cursor.try_collect().await?;
    Ok(Json(result_views(&fixtures)))
}

pub async fn get_fixture_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Fixture>> {
    let object_id = parse_id(&id)?;
    match fixtures_collection(&state)
        .find_one(doc! { "_id": object_id })
        .await?
    {
        Some(fixture) => Ok(Json(fixture)),
        None => Err(AppError::DocumentNotFound),
    }
}

pub async fn create_fixture(
    State(state): State<AppState>,
    Json(payload): Json<CreateFixture>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let now = Utc::now();
    let fixture = Fixture {
        id: None,
        date: payload.date,
        time: payload.time,
        venue: payload.venue,
        competition: payload.competition,
        competition_type: payload.competition_type,
        season: payload.season,
        home_team: payload.home_team,
        home_logo: payload.home_logo,
        away_team: payload.away_team,
        away_logo: payload.away_logo,
        home_score: None,
        away_score: None,
        status: FixtureStatus::Scheduled,
        timeline: Vec::new(),
        match_image: payload.match_image,
        created_at: now,
        updated_at: now,
    };

    let insert = fixtures_collection(&state).insert_one(&fixture).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();

    tracing::info!(
        "Created fixture {} vs {} on {}",
        fixture.home_team,
        fixture.away_team,
        fixture.date
    );
    Ok(Json(FormResult::ok_with_id("Fixture created", id)))
}

pub async fn update_fixture(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateFixture>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! { "updated_at": bson::DateTime::from_chrono(Utc::now()) };
    if let Some(date) = payload.date {
        set.insert("date", date);
    }
    if let Some(time) = payload.time {
        set.insert("time", time);
    }
    if let Some(venue) = payload.venue {
        set.insert("venue", venue);
    }
    if let Some(competition) = payload.competition {
        set.insert("competition", competition);
    }
    if let Some(competition_type) = payload.competition_type {
        set.insert("competition_type", competition_type);
    }
    if let Some(season) = payload.season {
        set.insert("season", season);
    }
    if let Some(home_team) = payload.home_team {
        set.insert("home_team", home_team);
    }
    if let Some(home_logo) = payload.home_logo {
        set.insert("home_logo", home_logo);
    }
    if let Some(away_team) = payload.away_team {
        set.insert("away_team", away_team);
    }
    if let Some(away_logo) = payload.away_logo {
        set.insert("away_logo", away_logo);
    }
    if let Some(match_image) = payload.match_image {
        set.insert("match_image", match_image);
    }

    let result = fixtures_collection(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Fixture updated")))
}

pub async fn update_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ScoreUpdate>,
) -> Result<Json<Fixture>> {
    let object_id = parse_id(&id)?;
    let filter = doc! { "_id": object_id };

    let mut set = doc! { "updated_at": bson::DateTime::from_chrono(Utc::now()) };
    if let Some(home_score) = payload.home_score {
        set.insert("home_score", home_score);
    }
    if let Some(away_score) = payload.away_score {
        set.insert("away_score", away_score);
    }

    let collection = fixtures_collection(&state);
    let result = collection
        .update_one(filter.clone(), doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }

    collection
        .find_one(filter)
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Fixture>> {
    let object_id = parse_id(&id)?;
    let status = FixtureStatus::parse(&payload.status).ok_or_else(|| {
        AppError::invalid_data(
            "Invalid status. Must be one of: SCHEDULED, LIVE, FT, POSTPONED, CANCELLED",
        )
    })?;

    let filter = doc! { "_id": object_id };
    let update = doc! {
        "$set": {
            "status": status.as_str(),
            "updated_at": bson::DateTime::from_chrono(Utc::now()),
        }
    };

    let collection = fixtures_collection(&state);
    let result = collection.update_one(filter.clone(), update).await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }

    tracing::info!("Fixture {} status set to {}", id, status.as_str());
    collection
        .find_one(filter)
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

/// Appends one event to the fixture's timeline. Array order is display
/// order; nothing re-sorts or validates the time labels.
pub async fn add_timeline_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateTimelineEvent>,
) -> Result<Json<Fixture>> {
    if let Err(e) = payload.validate() {
        return Err(AppError::from(e));
    }
    let object_id = parse_id(&id)?;
    let event = payload.into_event();
    let event_bson = to_bson(&event).map_err(|e| AppError::invalid_data(e.to_string()))?;

    let filter = doc! { "_id": object_id };
    let update = doc! {
        "$push": { "timeline": event_bson },
        "$set": { "updated_at": bson::DateTime::from_chrono(Utc::now()) },
    };

    let collection = fixtures_collection(&state);
    let result = collection.update_one(filter.clone(), update).await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }

    collection
        .find_one(filter)
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

pub async fn update_timeline_event(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Json(payload): Json<CreateTimelineEvent>,
) -> Result<Json<Fixture>> {
    if let Err(e) = payload.validate() {
        return Err(AppError::from(e));
    }
    let object_id = parse_id(&id)?;
    let event = payload.into_event();
    let event_bson = to_bson(&event).map_err(|e| AppError::invalid_data(e.to_string()))?;

    let collection = fixtures_collection(&state);
    let filter = doc! { "_id": object_id };

    let fixture = collection
        .find_one(filter.clone())
        .await?
        .ok_or(AppError::DocumentNotFound)?;
    if index >= fixture.timeline.len() {
        return Err(AppError::invalid_data(format!(
            "Timeline index {} out of range ({} events)",
            index,
            fixture.timeline.len()
        )));
    }

    let mut set = mongodb::bson::Document::new();
    set.insert(format!("timeline.{}", index), event_bson);
    set.insert("updated_at", bson::DateTime::from_chrono(Utc::now()));
    collection
        .update_one(filter.clone(), doc! { "$set": set })
        .await?;

    collection
        .find_one(filter)
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

pub async fn delete_timeline_event(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<Fixture>> {
    let object_id = parse_id(&id)?;
    let collection = fixtures_collection(&state);
    let filter = doc! { "_id": object_id };

    let mut fixture = collection
        .find_one(filter.clone())
        .await?
        .ok_or(AppError::DocumentNotFound)?;
    if index >= fixture.timeline.len() {
        return Err(AppError::invalid_data(format!(
            "Timeline index {} out of range ({} events)",
            index,
            fixture.timeline.len()
        )));
    }
    fixture.timeline.remove(index);
    fixture.updated_at = Utc::now();

    collection.replace_one(filter.clone(), &fixture).await?;
    Ok(Json(fixture))
}
