use serde::Deserialize;
use thiserror::Error;

// Helper structs to parse the JSON error response from ORS
#[derive(Deserialize, Debug)]
pub struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}
#[derive(Deserialize, Debug)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    // Structured error returned by the API alongside a non-success status
    #[error("API Error (HTTP {status}, code {code}): {message}")]
    ApiError {
        status: u16,
        code: u32,
        message: String,
    },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error (HTTP {status}): {body}")]
    RawApiError { status: u16, body: String },

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),
}

impl RoutingError {
    /// True for failures where the provider could not be reached or refused the
    /// request, as opposed to answering with something we cannot read.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            RoutingError::ApiError { .. }
                | RoutingError::RawApiError { .. }
                | RoutingError::RequestError(_)
        )
    }

    /// Connect failures and timeouts. These are the only errors worth a retry.
    pub fn is_transient(&self) -> bool {
        match self {
            RoutingError::RequestError(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Builds the error for a non-success status, preferring the structured ORS payload.
    pub fn from_status(status: u16, body: String) -> Self {
        match serde_json::from_str::<OrsErrorPayload>(&body) {
            Ok(payload) => RoutingError::ApiError {
                status,
                code: payload.error.code,
                message: payload.error.message,
            },
            Err(_) => RoutingError::RawApiError { status, body },
        }
    }
}
