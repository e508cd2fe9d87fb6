use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Message reported by the server, shown to the user verbatim.
    #[error("{0}")]
    Server(String),
    /// Non-success response whose body carried no usable message.
    #[error("request failed with status {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// The `{message}` / `{error}` envelope every mutating endpoint answers with.
#[derive(Deserialize)]
struct Outcome {
    message: Option<String>,
    error: Option<String>,
}

/// Maps a response to the user-facing outcome: the server's `message` on
/// success, its `error` field verbatim on failure, and the raw body or the
/// bare status when the body is not the expected envelope.
pub(crate) fn decode_outcome(status: StatusCode, body: &str) -> Result<String, ApiError> {
    match serde_json::from_str::<Outcome>(body) {
        Ok(outcome) if status.is_success() => Ok(outcome.message.unwrap_or_default()),
        Ok(outcome) => Err(match outcome.error {
            Some(error) => ApiError::Server(error),
            None => ApiError::Status(status),
        }),
        Err(_) if body.trim().is_empty() => Err(ApiError::Status(status)),
        Err(_) => Err(ApiError::Server(body.trim().to_owned())),
    }
}
