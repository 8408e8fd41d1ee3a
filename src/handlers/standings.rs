use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use serde::Deserialize;
use validator::Validate;

use crate::database::standings::StandingsRepo;
use crate::errors::{AppError, FormResult, Result};
use crate::models::standing::{CreateStanding, ReplaceRows, RowPatch, Standing};
use crate::state::AppState;

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_data("Invalid standing ID format"))
}

#[derive(Debug, Deserialize)]
pub struct StandingQuery {
    pub league: Option<String>,
    pub season: Option<String>,
    pub group: Option<String>,
}

/// League tables are served exactly as stored: row order and rank come from
/// whoever last updated the document, nothing is recomputed here.
pub async fn get_standings(
    State(state): State<AppState>,
    Query(query): Query<StandingQuery>,
) -> Result<Json<Vec<Standing>>> {
    let mut filter = doc! {};
    if let Some(league) = &query.league {
        filter.insert("league", league);
    }
    if let Some(season) = &query.season {
        filter.insert("season", season);
    }
    if let Some(group) = &query.group {
        filter.insert("group", group);
    }

    let repo = StandingsRepo::new(&state.db);
    let cursor = repo.collection().find(filter).await?;
    let standings: Vec<Standing> = cursor.try_collect().await?;
    Ok(Json(standings))
}

pub async fn get_standing_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Standing>> {
    let object_id = parse_id(&id)?;
    let repo = StandingsRepo::new(&state.db);
    repo.collection()
        .find_one(doc! { "_id": object_id })
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

pub async fn create_standing(
    State(state): State<AppState>,
    Json(payload): Json<CreateStanding>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let standing = Standing {
        id: None,
        league: payload.league,
        group: payload.group,
        season: payload.season,
        rows: payload.rows,
        updated_at: Utc::now(),
    };

    let repo = StandingsRepo::new(&state.db);
    let insert = repo.collection().insert_one(&standing).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();

    tracing::info!(
        "Created standing for {} {} ({} rows)",
        standing.league,
        standing.season,
        standing.rows.len()
    );
    Ok(Json(FormResult::ok_with_id("Standing created", id)))
}

/// Replaces the entire row list, the normal update path for a league table.
pub async fn replace_rows(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ReplaceRows>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let rows_bson = to_bson(&payload.rows).map_err(|e| AppError::invalid_data(e.to_string()))?;

    let repo = StandingsRepo::new(&state.db);
    let result = repo
        .collection()
        .update_one(
            doc! { "_id": object_id },
            doc! { "$set": {
                "rows": rows_bson,
                "updated_at": bson::DateTime::from_chrono(Utc::now()),
            }},
        )
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Standing rows replaced")))
}

/// Patches one row by index through the repository's read-modify-write.
pub async fn replace_row(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Json(patch): Json<RowPatch>,
) -> Result<Json<Standing>> {
    let repo = StandingsRepo::new(&state.db);
    let standing = repo.replace_row(&id, index, &patch).await?;
    Ok(Json(standing))
}

pub async fn delete_standing(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let repo = StandingsRepo::new(&state.db);
    let result = repo
        .collection()
        .delete_one(doc! { "_id": object_id })
        .await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Standing deleted")))
}
