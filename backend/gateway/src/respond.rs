//! Error → HTTP response mapping.
//!
//! Every `ReciboError` kind maps to exactly one status code. Outside debug
//! mode, upstream failures get a generic `detail` so provider/credential
//! specifics never leak to callers; invalid-input messages are about the
//! caller's own upload and are always included.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use recibo_core::ReciboError;

pub fn error_response(err: &ReciboError, debug: bool) -> Response {
    let (status, generic) = match err {
        ReciboError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input."),
        ReciboError::UpstreamAuth { .. } => (
            StatusCode::UNAUTHORIZED,
            "Upstream provider rejected our credentials.",
        ),
        ReciboError::UpstreamQuota { .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            "Upstream provider quota exceeded.",
        ),
        ReciboError::UpstreamTimeout { .. } => (
            StatusCode::GATEWAY_TIMEOUT,
            "Upstream provider timed out.",
        ),
        ReciboError::UpstreamUnavailable { .. } => (
            StatusCode::BAD_GATEWAY,
            "Upstream provider request failed.",
        ),
        ReciboError::StructuringParse(_) => (
            StatusCode::BAD_GATEWAY,
            "The language model reply could not be parsed.",
        ),
        ReciboError::Validation(_) => (
            StatusCode::BAD_GATEWAY,
            "The language model reply did not match the expense schema.",
        ),
        ReciboError::Unexpected(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
        }
    };

    if status.is_server_error() {
        error!(status = %status, error = %err, "Receipt processing failed");
    } else {
        warn!(status = %status, error = %err, "Receipt request rejected");
    }

    let detail = match err {
        ReciboError::InvalidInput(msg) => msg.clone(),
        _ if debug => err.to_string(),
        _ => generic.to_string(),
    };

    (status, Json(json!({ "detail": detail }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn status_of(err: &ReciboError) -> StatusCode {
        error_response(err, false).status()
    }

    #[test]
    fn every_kind_has_a_status() {
        assert_eq!(
            status_of(&ReciboError::InvalidInput("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(&ReciboError::UpstreamAuth {
                provider: "gemini".into(),
                message: "denied".into()
            }),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(&ReciboError::UpstreamQuota {
                provider: "gemini".into()
            }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_of(&ReciboError::UpstreamTimeout {
                provider: "google-vision".into()
            }),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_of(&ReciboError::UpstreamUnavailable {
                provider: "google-vision".into(),
                message: "503".into()
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(&ReciboError::StructuringParse("not json".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(&ReciboError::Validation("no amount".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(&ReciboError::Unexpected(anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
