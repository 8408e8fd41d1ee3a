use mongodb::Database;
use std::sync::Arc;

use crate::services::auth::{CredentialCheck, SessionValidator};
use crate::services::cloudinary::CloudinaryService;
use crate::services::stripe::StripeService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub credentials: Arc<dyn CredentialCheck>,
    pub sessions: Arc<dyn SessionValidator>,
    pub cloudinary: Option<Arc<CloudinaryService>>,
    pub stripe: Option<Arc<StripeService>>,
}

impl AppState {
    pub fn new(
        db: Database,
        credentials: Arc<dyn CredentialCheck>,
        sessions: Arc<dyn SessionValidator>,
    ) -> Self {
        AppState {
            db,
            credentials,
            sessions,
            cloudinary: None,
            stripe: None,
        }
    }

    pub fn with_cloudinary(mut self, cloudinary: Arc<CloudinaryService>) -> Self {
        self.cloudinary = Some(cloudinary);
        self
    }

    pub fn with_stripe(mut self, stripe: Arc<StripeService>) -> Self {
        self.stripe = Some(stripe);
        self
    }
}
