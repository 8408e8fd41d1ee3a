// config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub admin_password: String,
    pub stripe_secret_key: Option<String>,
    pub stripe_publishable_key: Option<String>,
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
    pub app_environment: String,
    pub port: u16,
    pub host: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let app_environment =
            env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        AppConfig {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "clubsite".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set"),
            stripe_secret_key: env::var("STRIPE_SECRET_KEY").ok(),
            stripe_publishable_key: env::var("STRIPE_PUBLISHABLE_KEY").ok(),
            checkout_success_url: env::var("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|_| "http://localhost:3000/shop/success".to_string()),
            checkout_cancel_url: env::var("CHECKOUT_CANCEL_URL")
                .unwrap_or_else(|_| "http://localhost:3000/shop/cart".to_string()),
            app_environment,
            port: env::var("PORT")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .expect("PORT must be a number"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_environment == "production"
    }

    pub fn get_config_info(&self) -> serde_json::Value {
        serde_json::json!({
            "environment": self.app_environment,
            "is_production": self.is_production(),
            "database_name": self.database_name,
            "stripe_secret_key_set": self.stripe_secret_key.is_some(),
            "stripe_publishable_key_set": self.stripe_publishable_key.is_some(),
            "checkout_success_url": self.checkout_success_url,
            "checkout_cancel_url": self.checkout_cancel_url,
            "port": self.port,
            "host": self.host,
        })
    }
}
