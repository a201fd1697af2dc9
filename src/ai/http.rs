//! Shared HTTP helpers for inference backends.

use std::time::Duration;

use reqwest::Response;

use super::InferenceError;

/// Convert a reqwest error into an [`InferenceError`].
pub fn request_error(e: reqwest::Error, timeout: Duration) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout(timeout)
    } else if e.is_decode() {
        InferenceError::Malformed(e.to_string())
    } else {
        InferenceError::Transport(e.to_string())
    }
}

/// Pass successful responses through; turn anything else into an error
/// carrying the response body.
pub async fn check_status(response: Response) -> Result<Response, InferenceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(InferenceError::Http {
        status: status.as_u16(),
        body,
    })
}
