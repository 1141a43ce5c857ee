use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Categorizes errors for callers that implement their own retry policy.
///
/// The crate itself never retries; classification is advisory data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rate limiting - may retry with backoff
    RateLimit,
    /// Authentication/authorization issues - should not retry
    Auth,
    /// Invalid request - should not retry
    InvalidRequest,
    /// Network/connection issues - may retry
    Network,
    /// API temporarily unavailable - may retry
    ServiceUnavailable,
    /// Unknown/other errors
    Other,
}

/// Twilio's error envelope, returned with any non-success HTTP status.
///
/// `code` is Twilio's provider-specific error number (e.g. 20003 for
/// authentication failures) and `more_info` links to its documentation
/// page; both are absent on some responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP status as reported inside the body.
    pub status: u16,
    /// Human-readable description of the failure.
    pub message: String,
    /// Twilio error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    /// Documentation URL for the error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "Twilio error {} (HTTP {}): {}",
                code, self.status, self.message
            ),
            None => write!(f, "Twilio error (HTTP {}): {}", self.status, self.message),
        }
    }
}

/// Errors that can occur when making requests to the Twilio API.
#[derive(Debug, Error)]
pub enum TwilioRequestError {
    /// Errors from the HTTP client
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),

    /// Error reported by the Twilio API in its documented envelope
    #[error("{0}")]
    Api(ErrorResponse),

    /// Unexpected response from the API
    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),
}

impl TwilioRequestError {
    /// Returns the error kind for categorizing errors in retry logic.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(err) => match err.status {
                401 | 403 => ErrorKind::Auth,
                429 => ErrorKind::RateLimit,
                400 | 404 | 405 => ErrorKind::InvalidRequest,
                500..=599 => ErrorKind::ServiceUnavailable,
                _ => ErrorKind::Other,
            },
            Self::ReqwestError(e) => {
                if e.is_timeout() || e.is_connect() || e.is_request() {
                    ErrorKind::Network
                } else {
                    ErrorKind::Other
                }
            }
            Self::SerdeError(_) | Self::UnexpectedResponse(_) => ErrorKind::Other,
        }
    }

    /// Returns true if this error should be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RateLimit | ErrorKind::Network | ErrorKind::ServiceUnavailable
        )
    }
}

impl From<ErrorResponse> for TwilioRequestError {
    fn from(envelope: ErrorResponse) -> Self {
        Self::Api(envelope)
    }
}

/// Parse an error response from the Twilio API.
///
/// Best effort: a body that does not match the documented envelope degrades
/// to a raw-text error value rather than a decode failure, so a malformed
/// error body is never fatal to the overall call.
pub(crate) fn parse_error_response(
    status: reqwest::StatusCode,
    bytes: bytes::Bytes,
) -> TwilioRequestError {
    match serde_json::from_slice::<ErrorResponse>(&bytes) {
        Ok(envelope) => TwilioRequestError::Api(envelope),
        Err(err) => {
            log::debug!("Twilio error body did not match the documented envelope: {err}");
            let error_text = String::from_utf8_lossy(&bytes);
            TwilioRequestError::UnexpectedResponse(format!(
                "HTTP status {}: {}",
                status.as_u16(),
                error_text
            ))
        }
    }
}
