use chrono::{DateTime, Utc};
use mongodb::bson;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Unit price in the shop currency, e.g. 24.99.
    pub price: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    pub in_stock: bool,
    pub published: bool,
    pub featured: bool,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
    pub image: Option<String>,
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn negative_price_fails_validation() {
        let payload: CreateProduct = serde_json::from_value(serde_json::json!({
            "name": "Home Shirt",
            "price": -1.0,
        }))
        .unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn minimal_payload_defaults_to_in_stock_unpublished() {
        let payload: CreateProduct = serde_json::from_value(serde_json::json!({
            "name": "Home Shirt",
            "price": 24.99,
        }))
        .unwrap();
        assert!(payload.validate().is_ok());
        assert!(payload.in_stock);
        assert!(!payload.published);
        assert!(!payload.featured);
    }
}
