use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sellable match-attendance record. Purchase happens off-site through the
/// external link; this record only advertises it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    pub match_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub purchase_url: String,

    pub published: bool,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicket {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub team_id: Option<String>,
    #[validate(length(min = 1, message = "match date is required"))]
    pub match_date: String,
    pub price: Option<f64>,
    #[validate(url(message = "purchase_url must be a valid URL"))]
    pub purchase_url: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub team_id: Option<String>,
    pub match_date: Option<String>,
    pub price: Option<f64>,
    pub purchase_url: Option<String>,
    pub published: Option<bool>,
}
