use axum::{extract::State, response::Json};
use mongodb::bson::{doc, oid::ObjectId};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::{AppError, Result};
use crate::handlers::products::products;
use crate::services::cart::{CartLine, CartStore, MemoryStorage};
use crate::services::stripe::{line_items_from_cart, StripeService};
use crate::state::AppState;

const SHOP_CURRENCY: &str = "gbp";

#[derive(Debug, Deserialize)]
pub struct CheckoutLine {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutLine>,
}

fn gateway(state: &AppState) -> Result<&StripeService> {
    state
        .stripe
        .as_deref()
        .ok_or_else(|| AppError::ServiceUnavailable("Payment gateway not configured".to_string()))
}

/// Prices the posted cart lines from the products collection. Prices are
/// never trusted from the client.
async fn price_cart(state: &AppState, lines: &[CheckoutLine]) -> Result<CartStore<MemoryStorage>> {
    let mut cart = CartStore::load(MemoryStorage::default())?;
    let collection = products(state);

    for line in lines {
        if line.quantity == 0 {
            continue;
        }
        let object_id = ObjectId::parse_str(&line.product_id)
            .map_err(|_| AppError::invalid_data("Invalid product ID in cart"))?;
        let product = collection
            .find_one(doc! { "_id": object_id, "published": true })
            .await?
            .ok_or_else(|| {
                AppError::invalid_data(format!("Unknown product in cart: {}", line.product_id))
            })?;
        if !product.in_stock {
            return Err(AppError::invalid_data(format!(
                "'{}' is out of stock",
                product.name
            )));
        }
        cart.add(CartLine {
            product_id: line.product_id.clone(),
            name: product.name,
            price: product.price,
            quantity: line.quantity,
        })?;
    }

    if cart.items().is_empty() {
        return Err(AppError::invalid_data("Cart is empty"));
    }
    Ok(cart)
}

/// Hands the cart to Stripe Checkout and returns the hosted session URL. No
/// order record is written here; the gateway owns the payment lifecycle.
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<Value>> {
    let stripe = gateway(&state)?;
    let cart = price_cart(&state, &payload.items).await?;
    let line_items = line_items_from_cart(cart.items());

    let session = stripe
        .create_checkout_session(&line_items, SHOP_CURRENCY)
        .await?;

    tracing::info!(
        "Checkout session {} created: {} items, total {:.2}",
        session.id,
        cart.item_count(),
        cart.total()
    );
    Ok(Json(json!({
        "session_id": session.id,
        "url": session.url,
        "total": cart.total(),
        "item_count": cart.item_count(),
    })))
}

/// Creates a payment intent for the cart total and returns the client secret
/// for Stripe's embedded payment element.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<Value>> {
    let stripe = gateway(&state)?;
    let cart = price_cart(&state, &payload.items).await?;
    let amount = (cart.total() * 100.0).round() as i64;

    let intent = stripe.create_payment_intent(amount, SHOP_CURRENCY).await?;

    Ok(Json(json!({
        "payment_intent_id": intent.id,
        "client_secret": intent.client_secret,
        "amount": intent.amount,
        "currency": intent.currency,
    })))
}

/// Publishable key and currency for the storefront's Stripe.js bootstrap.
pub async fn checkout_config(State(state): State<AppState>) -> Result<Json<Value>> {
    let stripe = gateway(&state)?;
    Ok(Json(json!({
        "publishable_key": stripe.publishable_key(),
        "currency": SHOP_CURRENCY,
    })))
}
