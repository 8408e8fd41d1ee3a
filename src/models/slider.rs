use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Homepage carousel entry. Sliders can be authored directly or derived from
/// featured news via the one-shot migration endpoint, in which case
/// `source_news_id` records where they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slider {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    pub published: bool,
    #[serde(default)]
    pub display_order: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_news_id: Option<String>,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSlider {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSlider {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
    pub published: Option<bool>,
    pub display_order: Option<i32>,
}
