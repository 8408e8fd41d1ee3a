use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SponsorTier {
    Primary,
    Partner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SponsorLogo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,
    pub image_url: String,

    /// Cloudinary public id, needed to delete the hosted image later.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,

    pub tier: SponsorTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    pub published: bool,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSponsorLogo {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: String,
    pub public_id: Option<String>,
    pub tier: SponsorTier,
    pub website: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateSponsorLogo {
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub public_id: Option<String>,
    pub tier: Option<SponsorTier>,
    pub website: Option<String>,
    pub published: Option<bool>,
}
