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
use crate::models::product::{CreateProduct, Product, UpdateProduct};
use crate::state::AppState;

pub fn products(state: &AppState) -> Collection<Product> {
    state.db.collection("products")
}

fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::invalid_data("Invalid product ID format"))
}

#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub all: Option<bool>,
}

pub async fn get_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let mut filter = doc! {};
    if !query.all.unwrap_or(false) {
        filter.insert("published", true);
    }
    if let Some(category) = &query.category {
        filter.insert("category", category);
    }
    if let Some(featured) = query.featured {
        filter.insert("featured", featured);
    }

    let cursor = products(&state).find(filter).await?;
    let mut items: Vec<Product> = cursor.try_collect().await?;
    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(items))
}

pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let object_id = parse_id(&id)?;
    products(&state)
        .find_one(doc! { "_id": object_id })
        .await?
        .map(Json)
        .ok_or(AppError::DocumentNotFound)
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProduct>,
) -> Result<Json<FormResult>> {
    if let Err(e) = payload.validate() {
        return Ok(Json(FormResult::failure(e.to_string())));
    }

    let now = Utc::now();
    let product = Product {
        id: None,
        name: payload.name,
        description: payload.description,
        price: payload.price,
        image: payload.image,
        category: payload.category,
        in_stock: payload.in_stock,
        published: payload.published,
        featured: payload.featured,
        created_at: now,
        updated_at: now,
    };
    let insert = products(&state).insert_one(&product).await?;
    let id = insert
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();
    Ok(Json(FormResult::ok_with_id("Product created", id)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProduct>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;

    if let Some(price) = payload.price {
        if price < 0.0 {
            return Ok(Json(FormResult::failure("price must not be negative")));
        }
    }

    let mut set = doc! { "updated_at": bson::DateTime::from_chrono(Utc::now()) };
    if let Some(name) = payload.name {
        set.insert("name", name);
    }
    if let Some(description) = payload.description {
        set.insert("description", description);
    }
    if let Some(price) = payload.price {
        set.insert("price", price);
    }
    if let Some(image) = payload.image {
        set.insert("image", image);
    }
    if let Some(category) = payload.category {
        set.insert("category", category);
    }
    if let Some(in_stock) = payload.in_stock {
        set.insert("in_stock", in_stock);
    }
    if let Some(published) = payload.published {
        set.insert("published", published);
    }
    if let Some(featured) = payload.featured {
        set.insert("featured", featured);
    }

    let result = products(&state)
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .await?;
    if result.matched_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Product updated")))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormResult>> {
    let object_id = parse_id(&id)?;
    let result = products(&state)
        .delete_one(doc! { "_id": object_id })
        .await?;
    if result.deleted_count == 0 {
        return Err(AppError::DocumentNotFound);
    }
    Ok(Json(FormResult::ok("Product deleted")))
}
