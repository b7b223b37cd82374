use async_trait::async_trait;

use crate::error::ReciboError;

/// Capability seam for the OCR upstream (image bytes → extracted text).
///
/// Implementations make a single bounded attempt; failures come back as a
/// labeled `ReciboError`, never as a silently-swallowed empty result. An
/// image with no legible text is `Ok("")`, not an error.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider name for logs and error messages (e.g., "google-vision").
    fn name(&self) -> &str;

    async fn extract_text(&self, image: &[u8], mime_type: &str) -> Result<String, ReciboError>;
}

/// Capability seam for the structuring upstream (text → expense JSON).
///
/// The returned value is the model's reply parsed as loose JSON; schema
/// validation happens downstream in the validator.
#[async_trait]
pub trait StructuringProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn structure(&self, text: &str) -> Result<serde_json::Value, ReciboError>;
}
