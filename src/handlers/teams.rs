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
use crate::models::team::{
    CreatePlayer, CreateStaff, CreateTeam, Player, Staff, Team, UpdatePlayer, UpdateStaff,
    UpdateTeam,
};
use crate::state::AppState;

fn teams(state: &AppState) -> Collection<Team> {
    state.db.collection("teams")
}

fn players(state: &AppState) -> Collection<Player> {
    state.db.collection("players")
}

fn staff(state: &AppState) -> Collection<Staff> {
    state.db.collection("staff")
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_data("Invalid ID format"))
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    err.to_string().contains("E11000")
}

// ========== TEAMS ==========

pub async fn get_teams(State(state): State<AppState>) -> Result<Json<Vec<Team>>> {
    let cursor = teams(&state).find(doc! {}).await?;
    let mut all: Vec<Team> = cursor.try_collect().await?;
    all.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(all))
}

pub async fn get_team_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Team>> {
    let object_id = parse_id(&id)?;
    teams(&state)
        .find_one(doc! { "_id": object_id })
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

pub async fn create_team(
    State(state): State<AppState>,
    Json(payload): Json<CreateTeam>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let team = Team {
        id: None,
        name: payload.name,
        age_group: payload.age_group,
        logo: payload.logo,
        description: payload.description,
        created_at: Utc::now(),
    };

    // Team name carries a unique index.
    let insert = match teams(&state).insert_one(&team).await {
        Ok(insert) => insert,
        Err(e) if is_duplicate_key(&e) => {
            return Ok(Json(FormResult::failure(format!(
                "A team named '{}' already exists",
                team.name
            ))))
        }
        Err(e) => return Err(e.into()),
    };

    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("Team created", id)))
}

pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTeam>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! {};
    if let Some(name) = payload.name {
        set.insert("name", name);
    }
    if let Some(age_group) = payload.age_group {
        set.insert("age_group", age_group);
    }
    if let Some(logo) = payload.logo {
        set.insert("logo", logo);
    }
    if let Some(description) = payload.description {
        set.insert("description", description);
    }
    if set.is_empty() {
        return Ok(Json(FormResult::failure("Nothing to update")));
    }

    let result = teams(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Team updated")))
}

/// Deletes only the team document. Players and staff keep their team_id
/// back-reference and remain queryable; there is no cascade.
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let result = teams(&state).delete_one(doc! { "_id": object_id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    tracing::info!("Deleted team {}; its players/staff are left orphaned", id);
    Ok(Json(FormResult::ok("Team deleted")))
}

pub async fn get_team_players(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Player>>> {
    let cursor = players(&state).find(doc! { "team_id": &id }).await?;
    let mut roster: Vec<Player> = cursor.try_collect().await?;
    roster.sort_by_key(|p| p.squad_number.unwrap_or(i32::MAX));
    Ok(Json(roster))
}

pub async fn get_team_staff(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Staff>>> {
    let cursor = staff(&state).find(doc! { "team_id": &id }).await?;
    let members: Vec<Staff> = cursor.try_collect().await?;
    Ok(Json(members))
}

// ========== PLAYERS ==========

#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    pub team_id: Option<String>,
    pub position: Option<String>,
}

pub async fn get_players(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<Vec<Player>>> {
    let mut filter = doc! {};
    if let Some(team_id) = &query.team_id {
        filter.insert("team_id", team_id);
    }
    if let Some(position) = &query.position {
        filter.insert("position", position);
    }
    let cursor = players(&state).find(filter).await?;
    let roster: Vec<Player> = cursor.try_collect().await?;
    Ok(Json(roster))
}

pub async fn create_player(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlayer>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let player = Player {
        id: None,
        name: payload.name,
        position: payload.position,
        squad_number: payload.squad_number,
        team_id: payload.team_id,
        photo: payload.photo,
        created_at: Utc::now(),
    };
    let insert = players(&state).insert_one(&player).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("Player created", id)))
}

pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePlayer>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! {};
    if let Some(name) = payload.name {
        set.insert("name", name);
    }
    if let Some(position) = payload.position {
        set.insert("position", position);
    }
    if let Some(squad_number) = payload.squad_number {
        set.insert("squad_number", squad_number);
    }
    if let Some(team_id) = payload.team_id {
        set.insert("team_id", team_id);
    }
    if let Some(photo) = payload.photo {
        set.insert("photo", photo);
    }
    if set.is_empty() {
        return Ok(Json(FormResult::failure("Nothing to update")));
    }

    let result = players(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Player updated")))
}

pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let result = players(&state).delete_one(doc! { "_id": object_id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Player deleted")))
}

// ========== STAFF ==========

pub async fn get_staff(
    State(state): State<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<Vec<Staff>>> {
    let mut filter = doc! {};
    if let Some(team_id) = &query.team_id {
        filter.insert("team_id", team_id);
    }
    let cursor = staff(&state).find(filter).await?;
    let members: Vec<Staff> = cursor.try_collect().await?;
    Ok(Json(members))
}

pub async fn create_staff(
    State(state): State<AppState>,
    Json(payload): Json<CreateStaff>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let member = Staff {
        id: None,
        name: payload.name,
        role: payload.role,
        team_id: payload.team_id,
        photo: payload.photo,
        created_at: Utc::now(),
    };
    let insert = staff(&state).insert_one(&member).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("Staff member created", id)))
}

pub async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStaff>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! {};
    if let Some(name) = payload.name {
        set.insert("name", name);
    }
    if let Some(role) = payload.role {
        set.insert("role", role);
    }
    if let Some(team_id) = payload.team_id {
        set.insert("team_id", team_id);
    }
    if let Some(photo) = payload.photo {
        set.insert("photo", photo);
    }
    if set.is_empty() {
        return Ok(Json(FormResult::failure("Nothing to update")));
    }

    let result = staff(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Staff member updated")))
}

pub async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let result = staff(&state).delete_one(doc! { "_id": object_id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Staff member deleted")))
}
