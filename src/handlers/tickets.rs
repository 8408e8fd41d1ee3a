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
use crate::models::ticket::{CreateTicket, Ticket, UpdateTicket};
use crate::state::AppState;

fn tickets(state: &AppState) -> Collection<Ticket> {
    state.db.collection("tickets")
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_data("Invalid ticket ID format"))
}

#[derive(Debug, Deserialize)]
pub struct TicketQuery {
    pub team_id: Option<String>,
    pub all: Option<bool>,
}

pub async fn get_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketQuery>,
) -> Result<Json<Vec<Ticket>>> {
    let mut filter = doc! {};
    if !query.all.unwrap_or(false) {
        filter.insert("published", true);
    }
    if let Some(team_id) = &query.team_id {
        filter.insert("team_id", team_id);
    }

    let cursor = tickets(&state).find(filter).await?;
    let mut entries: Vec<Ticket> = cursor.try_collect().await?;
    entries.sort_by(|a, b| a.match_date.cmp(&b.match_date));
    Ok(Json(entries))
}

pub async fn create_ticket(
    State(state): State<AppState>,
    Json(payload): Json<CreateTicket>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let ticket = Ticket {
        id: None,
        title: payload.title,
        team_id: payload.team_id,
        match_date: payload.match_date,
        price: payload.price,
        purchase_url: payload.purchase_url,
        published: payload.published,
        created_at: Utc::now(),
    };
    let insert = tickets(&state).insert_one(&ticket).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("Ticket created", id)))
}

pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTicket>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    let mut set = doc! {};
    if let Some(title) = payload.title {
        set.insert("title", title);
    }
    if let Some(team_id) = payload.team_id {
        set.insert("team_id", team_id);
    }
    if let Some(match_date) = payload.match_date {
        set.insert("match_date", match_date);
    }
    if let Some(price) = payload.price {
        set.insert("price", price);
    }
    if let Some(purchase_url) = payload.purchase_url {
        set.insert("purchase_url", purchase_url);
    }
    if let Some(published) = payload.published {
        set.insert("published", published);
    }
    if set.is_empty() {
        return Ok(Json(FormResult::failure("Nothing to update")));
    }

    let result = tickets(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Ticket updated")))
}

pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let result = tickets(&state).delete_one(doc! { "_id": object_id }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Ticket deleted")))
}
