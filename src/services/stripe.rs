// services/stripe.rs
//
// Thin client for the two Stripe calls the shop needs: Checkout session
// creation and payment intents. Stripe's API is form-encoded with bracketed
// nested keys; the param builders are pure functions so the translation from
// cart lines to gateway format stays testable offline.
//
// The gateway owns the whole payment lifecycle. Nothing here is treated as a
// source of truth for fulfilment and no retry is attempted on failure.

use reqwest::Client;
use serde::Deserialize;

use crate::errors::{AppError, Result};
use crate::services::cart::CartLine;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// One Checkout line in Stripe's shape: integer minor units plus quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub unit_amount: i64,
    pub quantity: u32,
}

/// Translates cart lines into Stripe line items. Prices move from a decimal
/// major unit to integer minor units (10.00 -> 1000).
pub fn line_items_from_cart(items: &[CartLine]) -> Vec<LineItem> {
    items
        .iter()
        .map(|line| LineItem {
            name: line.name.clone(),
            unit_amount: (line.price * 100.0).round() as i64,
            quantity: line.quantity,
        })
        .collect()
}

/// Form parameters for POST /v1/checkout/sessions.
pub fn checkout_session_params(
    items: &[LineItem],
    currency: &str,
    success_url: &str,
    cancel_url: &str,
) -> Vec<(String, String)> {
    let mut params = vec![
        ("mode".to_string(), "payment".to_string()),
        ("success_url".to_string(), success_url.to_string()),
        ("cancel_url".to_string(), cancel_url.to_string()),
    ];
    for (i, item) in items.iter().enumerate() {
        params.push((
            format!("line_items[{}][price_data][currency]", i),
            currency.to_string(),
        ));
        params.push((
            format!("line_items[{}][price_data][product_data][name]", i),
            item.name.clone(),
        ));
        params.push((
            format!("line_items[{}][price_data][unit_amount]", i),
            item.unit_amount.to_string(),
        ));
        params.push((format!("line_items[{}][quantity]", i), item.quantity.to_string()));
    }
    params
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

pub struct StripeService {
    secret_key: String,
    publishable_key: String,
    success_url: String,
    cancel_url: String,
    client: Client,
}

impl StripeService {
    pub fn new(
        secret_key: String,
        publishable_key: String,
        success_url: String,
        cancel_url: String,
    ) -> Result<Self> {
        if secret_key.is_empty() {
            return Err(AppError::configuration("STRIPE_SECRET_KEY is empty"));
        }
        Ok(StripeService {
            secret_key,
            publishable_key,
            success_url,
            cancel_url,
            client: Client::new(),
        })
    }

    pub fn publishable_key(&self) -> &str {
        &self.publishable_key
    }

    pub async fn create_checkout_session(
        &self,
        items: &[LineItem],
        currency: &str,
    ) -> Result<CheckoutSession> {
        if items.is_empty() {
            return Err(AppError::invalid_data("Cart is empty"));
        }
        let params =
            checkout_session_params(items, currency, &self.success_url, &self.cancel_url);
        self.post_form("/checkout/sessions", &params).await
    }

    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent> {
        if amount <= 0 {
            return Err(AppError::invalid_data("Amount must be positive"));
        }
        let params = vec![
            ("amount".to_string(), amount.to_string()),
            ("currency".to_string(), currency.to_string()),
            (
                "automatic_payment_methods[enabled]".to_string(),
                "true".to_string(),
            ),
        ];
        self.post_form("/payment_intents", &params).await
    }

    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}{}", STRIPE_API_BASE, path);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(params)
            .send()
            .await
            .map_err(|e| AppError::stripe(format!("Request to {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<StripeErrorBody>().await {
                Ok(body) => body
                    .error
                    .message
                    .unwrap_or_else(|| "Unknown Stripe error".to_string()),
                Err(_) => format!("Stripe returned HTTP {}", status),
            };
            tracing::error!("Stripe {} failed: {}", path, message);
            return Err(AppError::stripe(message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::stripe(format!("Failed to parse response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_lines_translate_to_minor_units() {
        let items = line_items_from_cart(&[
            CartLine {
                product_id: "p1".to_string(),
                name: "Home Shirt".to_string(),
                price: 10.0,
                quantity: 4,
            },
            CartLine {
                product_id: "p2".to_string(),
                name: "Scarf".to_string(),
                price: 12.99,
                quantity: 1,
            },
        ]);
        assert_eq!(items[0].unit_amount, 1000);
        assert_eq!(items[0].quantity, 4);
        assert_eq!(items[1].unit_amount, 1299);
    }

    #[test]
    fn session_params_index_each_line() {
        let items = vec![
            LineItem {
                name: "Home Shirt".to_string(),
                unit_amount: 1000,
                quantity: 2,
            },
            LineItem {
                name: "Scarf".to_string(),
                unit_amount: 1299,
                quantity: 1,
            },
        ];
        let params = checkout_session_params(
            &items,
            "gbp",
            "https://example.test/success",
            "https://example.test/cart",
        );

        let lookup = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(lookup("mode"), Some("payment"));
        assert_eq!(lookup("line_items[0][price_data][currency]"), Some("gbp"));
        assert_eq!(
            lookup("line_items[0][price_data][product_data][name]"),
            Some("Home Shirt")
        );
        assert_eq!(lookup("line_items[0][price_data][unit_amount]"), Some("1000"));
        assert_eq!(lookup("line_items[1][quantity]"), Some("1"));
    }
}
