//! Maps raw upstream failures onto labeled `ReciboError` kinds.
//!
//! Both clients funnel every non-success outcome through here so the gateway
//! sees one uniform error shape regardless of which provider failed.

use recibo_core::ReciboError;
use reqwest::StatusCode;

/// Classify a non-success HTTP status from an upstream provider.
pub fn classify_status(provider: &str, status: StatusCode, body: String) -> ReciboError {
    match status.as_u16() {
        401 | 403 => ReciboError::UpstreamAuth {
            provider: provider.to_string(),
            message: body,
        },
        429 => ReciboError::UpstreamQuota {
            provider: provider.to_string(),
        },
        _ => ReciboError::UpstreamUnavailable {
            provider: provider.to_string(),
            message: format!("{status}: {body}"),
        },
    }
}

/// Classify a transport-level reqwest error (connect failures, deadlines).
pub fn classify_transport(provider: &str, err: reqwest::Error) -> ReciboError {
    if err.is_timeout() {
        ReciboError::UpstreamTimeout {
            provider: provider.to_string(),
        }
    } else {
        ReciboError::UpstreamUnavailable {
            provider: provider.to_string(),
            message: err.to_string(),
        }
    }
}

/// Classify an error object embedded in a Vision response body.
///
/// Vision reports per-image failures in-band with a gRPC status code:
/// 7 PERMISSION_DENIED, 16 UNAUTHENTICATED, 8 RESOURCE_EXHAUSTED.
pub fn classify_grpc_code(provider: &str, code: i64, message: String) -> ReciboError {
    match code {
        7 | 16 => ReciboError::UpstreamAuth {
            provider: provider.to_string(),
            message,
        },
        8 => ReciboError::UpstreamQuota {
            provider: provider.to_string(),
        },
        _ => ReciboError::UpstreamUnavailable {
            provider: provider.to_string(),
            message: format!("code {code}: {message}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_auth() {
        let err = classify_status("google-vision", StatusCode::UNAUTHORIZED, "bad key".into());
        assert!(matches!(err, ReciboError::UpstreamAuth { .. }));
    }

    #[test]
    fn forbidden_maps_to_auth() {
        let err = classify_status("gemini", StatusCode::FORBIDDEN, "forbidden".into());
        assert!(matches!(err, ReciboError::UpstreamAuth { .. }));
    }

    #[test]
    fn too_many_requests_maps_to_quota() {
        let err = classify_status("gemini", StatusCode::TOO_MANY_REQUESTS, "slow down".into());
        assert!(matches!(err, ReciboError::UpstreamQuota { .. }));
    }

    #[test]
    fn server_error_maps_to_unavailable() {
        let err = classify_status("gemini", StatusCode::BAD_GATEWAY, "oops".into());
        assert!(matches!(err, ReciboError::UpstreamUnavailable { .. }));
    }

    #[test]
    fn grpc_resource_exhausted_maps_to_quota() {
        let err = classify_grpc_code("google-vision", 8, "quota".into());
        assert!(matches!(err, ReciboError::UpstreamQuota { .. }));
    }

    #[test]
    fn grpc_unauthenticated_maps_to_auth() {
        let err = classify_grpc_code("google-vision", 16, "no creds".into());
        assert!(matches!(err, ReciboError::UpstreamAuth { .. }));
    }
}
