//! Gemini structuring client.
//!
//! Sends the fixed receipt-parsing prompt plus the OCR text to
//! `generateContent` and parses the reply as JSON. Parsing happens here so
//! a garbled model reply surfaces as `StructuringParse`, never as a 200.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use recibo_core::{ReciboError, StructuringProvider};

use crate::classify::{classify_status, classify_transport};
use crate::prompt::RECEIPT_PROMPT;

const PROVIDER_NAME: &str = "gemini";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

pub struct GeminiStructurer {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiStructurer {
    /// Build a client with a fixed per-call deadline.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Gemini HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl StructuringProvider for GeminiStructurer {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn structure(&self, text: &str) -> Result<serde_json::Value, ReciboError> {
        debug!(model = %self.model, chars = text.len(), "Sending OCR text to Gemini");

        let body = serde_json::json!({
            "system_instruction": { "parts": [{ "text": RECEIPT_PROMPT }] },
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let resp = self
            .client
            .post(&url)
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

        let reply = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("");

        info!("Gemini structuring reply received");
        parse_reply(reply)
    }
}

/// Parse a model reply as JSON, tolerating markdown code fences.
pub fn parse_reply(reply: &str) -> Result<serde_json::Value, ReciboError> {
    let stripped = strip_code_fences(reply);
    serde_json::from_str(stripped).map_err(|e| ReciboError::StructuringParse(e.to_string()))
}

/// Models sometimes wrap JSON in ```json fences despite instructions.
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
