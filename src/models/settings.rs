use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// Site-wide toggle: a unique key mapped to an arbitrary JSON value, e.g.
/// which seasons are publicly visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub key: String,
    pub value: Bson,
}

#[derive(Debug, Deserialize)]
pub struct SetSetting {
    pub value: serde_json::Value,
}
