use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of a league table. Rank and points are stored exactly as supplied
/// by whoever updates the standing; nothing here recomputes or verifies them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub rank: i32,
    pub team: String,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub goal_difference: i32,
    pub points: i32,
}

/// Snapshot of a league table for a (league, group, season) triple. The row
/// list is replaced wholesale on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub league: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub season: String,

    pub rows: Vec<TableRow>,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStanding {
    #[validate(length(min = 1, message = "league is required"))]
    pub league: String,
    pub group: Option<String>,
    #[validate(length(min = 1, message = "season is required"))]
    pub season: String,
    #[serde(default)]
    pub rows: Vec<TableRow>,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceRows {
    pub rows: Vec<TableRow>,
}

/// Partial update for a single table row, applied by index through the
/// standings repository.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowPatch {
    pub rank: Option<i32>,
    pub team: Option<String>,
    pub played: Option<i32>,
    pub won: Option<i32>,
    pub drawn: Option<i32>,
    pub lost: Option<i32>,
    pub goals_for: Option<i32>,
    pub goals_against: Option<i32>,
    pub goal_difference: Option<i32>,
    pub points: Option<i32>,
}
