use thiserror::Error;

/// Top-level error type for the recibo service.
///
/// Every failure path in the pipeline maps onto exactly one of these kinds;
/// the gateway translates each kind into an HTTP status and a `detail` body.
#[derive(Debug, Error)]
pub enum ReciboError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("upstream auth failure ({provider}): {message}")]
    UpstreamAuth { provider: String, message: String },

    #[error("upstream quota exceeded ({provider})")]
    UpstreamQuota { provider: String },

    #[error("upstream timeout ({provider})")]
    UpstreamTimeout { provider: String },

    #[error("upstream unavailable ({provider}): {message}")]
    UpstreamUnavailable { provider: String, message: String },

    #[error("structuring reply was not valid JSON: {0}")]
    StructuringParse(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
