//! `POST /process-receipt/` — the receipt pipeline endpoint.
//!
//! Strictly linear per request: read the `file` part, sniff and size-check
//! it, OCR it, structure the text, validate the reply. No state survives the
//! request.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use recibo_core::{ExpenseRecord, ReciboError};

use crate::respond::error_response;
use crate::server::AppState;
use crate::sniff::sniff_image;

pub async fn process_receipt(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    match handle_upload(&state, multipart).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(&err, state.config.debug),
    }
}

async fn handle_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<ExpenseRecord, ReciboError> {
    let mut image: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ReciboError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ReciboError::InvalidInput(format!("could not read upload: {e}")))?;
            image = Some(bytes);
            break;
        }
    }

    let Some(image) = image else {
        return Err(ReciboError::InvalidInput(
            "missing multipart field `file`".to_string(),
        ));
    };

    if image.len() > state.config.max_upload_bytes {
        return Err(ReciboError::InvalidInput(format!(
            "file exceeds the {} byte upload limit",
            state.config.max_upload_bytes
        )));
    }

    let Some(mime) = sniff_image(&image) else {
        return Err(ReciboError::InvalidInput(
            "unsupported file type; expected a JPEG, PNG, WebP, GIF, TIFF, or BMP image"
                .to_string(),
        ));
    };

    debug!(bytes = image.len(), mime = %mime, "Accepted receipt upload");

    let text = state.ocr.extract_text(&image, mime).await?;
    if text.trim().is_empty() {
        return Err(ReciboError::InvalidInput(
            "no text could be found in the image".to_string(),
        ));
    }

    let record = structure_text(state, &text).await?;
    info!(amount = record.amount, category = %record.category, "Receipt processed");
    Ok(record)
}

/// Structuring + validation tail of the pipeline.
///
/// Split out so the no-crash-on-empty-text property can be exercised without
/// an upload.
pub async fn structure_text(state: &AppState, text: &str) -> Result<ExpenseRecord, ReciboError> {
    let raw = state.structurer.structure(text).await?;
    recibo_extract::validate_expense(raw)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use recibo_config::Config;
    use recibo_core::{OcrProvider, StructuringProvider};

    use super::*;

    struct NullOcr;

    #[async_trait]
    impl OcrProvider for NullOcr {
        fn name(&self) -> &str {
            "null"
        }
        async fn extract_text(&self, _image: &[u8], _mime: &str) -> Result<String, ReciboError> {
            Ok(String::new())
        }
    }

    struct MinimalStructurer;

    #[async_trait]
    impl StructuringProvider for MinimalStructurer {
        fn name(&self) -> &str {
            "minimal"
        }
        async fn structure(&self, _text: &str) -> Result<Value, ReciboError> {
            Ok(json!({ "amount": 0, "date": "2024-01-01" }))
        }
    }

    fn state() -> AppState {
        AppState {
            config: Config::from_env_map(&HashMap::new()),
            ocr: Arc::new(NullOcr),
            structurer: Arc::new(MinimalStructurer),
        }
    }

    // Structuring is attemptable on empty text; the pipeline does not
    // special-case it.
    #[tokio::test]
    async fn empty_text_still_structures() {
        let record = structure_text(&state(), "").await.unwrap();
        assert_eq!(record.amount, 0.0);
        assert!(record.companions.is_empty());
        assert_eq!(record.category, "Other");
    }
}
