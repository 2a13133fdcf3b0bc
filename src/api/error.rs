//! Fetch Error Types
//!
//! Every way a backend call can fail. The panels collapse all of them into
//! a single fallback path; the variants only enrich the logs.

use thiserror::Error;

/// Errors from a call to one of the backend services
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, reset, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status
    #[error("Unexpected status {status}")]
    Status { status: u16 },

    /// The body was not the JSON shape we expected
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Result type for backend calls
pub type FetchResult<T> = Result<T, FetchError>;

/// Fail on anything outside 200..=299, whatever the body says
pub fn check_status(status: u16) -> FetchResult<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::Status { status })
    }
}

/// Decode a response body into `T`
pub fn decode<T: serde::de::DeserializeOwned>(body: &str) -> FetchResult<T> {
    Ok(serde_json::from_str(body)?)
}
