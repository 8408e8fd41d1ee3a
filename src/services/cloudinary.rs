// services/cloudinary.rs
//
// Image hosting is delegated entirely to Cloudinary. Uploads are signed with
// the account secret (md5 over the sorted params); deletes are best-effort
// from the caller's point of view.

use reqwest::multipart;
use serde_json::Value;
use std::env;

use crate::errors::{AppError, Result};

#[derive(Clone)]
pub struct CloudinaryService {
    cloud_name: String,
    api_key: String,
    api_secret: String,
    client: reqwest::Client,
}

impl CloudinaryService {
    pub fn from_env() -> Result<Self> {
        let cloud_name = env::var("CLOUDINARY_CLOUD_NAME")
            .map_err(|_| AppError::cloudinary("CLOUDINARY_CLOUD_NAME not set"))?;
        let api_key = env::var("CLOUDINARY_API_KEY")
            .map_err(|_| AppError::cloudinary("CLOUDINARY_API_KEY not set"))?;
        let api_secret = env::var("CLOUDINARY_API_SECRET")
            .map_err(|_| AppError::cloudinary("CLOUDINARY_API_SECRET not set"))?;

        Ok(CloudinaryService {
            cloud_name,
            api_key,
            api_secret,
            client: reqwest::Client::new(),
        })
    }

    fn sign(&self, params_to_sign: &str) -> String {
        format!("{:x}", md5::compute(format!("{}{}", params_to_sign, self.api_secret)))
    }

    /// Uploads image bytes into a folder, returning (secure_url, public_id).
    pub async fn upload_image(
        &self,
        image_data: &[u8],
        folder: &str,
        public_id: Option<&str>,
    ) -> Result<(String, String)> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&format!("folder={}&timestamp={}", folder, timestamp));

        let upload_url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        );

        let mut form = multipart::Form::new()
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("folder", folder.to_string())
            .part(
                "file",
                multipart::Part::bytes(image_data.to_vec())
                    .file_name("image.jpg")
                    .mime_str("image/jpeg")
                    .map_err(|e| AppError::cloudinary(e.to_string()))?,
            );
        if let Some(pid) = public_id {
            form = form.text("public_id", pid.to_string());
        }

        let response = self
            .client
            .post(&upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::cloudinary(format!("Upload failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::cloudinary(format!(
                "Cloudinary API error: {}",
                error_text
            )));
        }

        let result: Value = response
            .json()
            .await
            .map_err(|e| AppError::cloudinary(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = result.get("error") {
            let message = error["message"].as_str().unwrap_or("Unknown Cloudinary error");
            return Err(AppError::cloudinary(message));
        }

        let secure_url = result["secure_url"]
            .as_str()
            .ok_or_else(|| AppError::cloudinary("No secure URL in response"))?
            .to_string();
        let public_id = result["public_id"]
            .as_str()
            .ok_or_else(|| AppError::cloudinary("No public ID in response"))?
            .to_string();

        Ok((secure_url, public_id))
    }

    pub async fn delete_image(&self, public_id: &str) -> Result<()> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&format!("public_id={}&timestamp={}", public_id, timestamp));

        let delete_url = format!(
            "https://api.cloudinary.com/v1_1/{}/image/destroy",
            self.cloud_name
        );

        let params = [
            ("public_id", public_id),
            ("api_key", &self.api_key),
            ("timestamp", &timestamp),
            ("signature", &signature),
        ];

        let response = self
            .client
            .post(&delete_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::cloudinary(format!("Delete failed: {}", e)))?;

        let result: Value = response
            .json()
            .await
            .map_err(|e| AppError::cloudinary(format!("Failed to parse response: {}", e)))?;

        if result["result"] != "ok" {
            return Err(AppError::cloudinary(format!(
                "Failed to delete image: {}",
                result["result"]
            )));
        }

        Ok(())
    }

    /// Delivery URL with an arbitrary transformation segment.
    pub fn transformed_url(&self, public_id: &str, transformations: &str) -> String {
        format!(
            "https://res.cloudinary.com/{}/image/upload/{}/{}",
            self.cloud_name, transformations, public_id
        )
    }

    pub fn thumbnail_url(&self, public_id: &str, width: u32, height: u32) -> String {
        self.transformed_url(public_id, &format!("c_fill,w_{},h_{},q_auto", width, height))
    }
}
