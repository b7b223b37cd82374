//! Google Cloud Vision OCR client.
//!
//! Single bounded attempt against the `images:annotate` REST endpoint with
//! TEXT_DETECTION; no retries. An image with no legible text is `Ok("")`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use tracing::{debug, info};

use recibo_core::{OcrProvider, ReciboError};

use crate::classify::{classify_grpc_code, classify_status, classify_transport};

const PROVIDER_NAME: &str = "google-vision";

pub struct GoogleVisionOcr {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleVisionOcr {
    /// Build a client with a fixed per-call deadline.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Vision HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: "https://vision.googleapis.com".to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl OcrProvider for GoogleVisionOcr {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn extract_text(&self, image: &[u8], mime_type: &str) -> Result<String, ReciboError> {
        debug!(bytes = image.len(), mime = %mime_type, "Sending image to Vision for OCR");

        let body = serde_json::json!({
            "requests": [{
                "image": { "content": STANDARD.encode(image) },
                "features": [{ "type": "TEXT_DETECTION" }]
            }]
        });

        let resp = self
            .client
            .post(format!("{}/v1/images:annotate", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_transport(PROVIDER_NAME, e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_status(PROVIDER_NAME, status, body));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| classify_transport(PROVIDER_NAME, e))?;

        let annotation = &json["responses"][0];

        // Per-image failures arrive in-band with a gRPC status code.
        if let Some(error) = annotation.get("error") {
            let code = error["code"].as_i64().unwrap_or(0);
            let message = error["message"].as_str().unwrap_or("").to_string();
            return Err(classify_grpc_code(PROVIDER_NAME, code, message));
        }

        // The first annotation carries the full extracted text; the rest are
        // per-word boxes we don't need.
        let text = annotation["textAnnotations"][0]["description"]
            .as_str()
            .unwrap_or("")
            .to_string();

        info!(chars = text.len(), "OCR complete");
        Ok(text)
    }
}
