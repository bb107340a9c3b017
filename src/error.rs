use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;

pub const GENERIC_FAILURE_MESSAGE: &str = "Unable to generate recommendations. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Malformed body or a missing required field. Not retried.
    #[error("invalid request: {0}")]
    InputValidation(String),

    /// Raised by the front end before the engine runs.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The data store could not persist results. Never fatal to a response.
    #[error("data store unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl EngineError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InputValidation(_) | EngineError::Authentication(_)
        )
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> String {
        if self.is_client_error() {
            self.to_string()
        } else {
            GENERIC_FAILURE_MESSAGE.to_string()
        }
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        EngineError::UpstreamUnavailable(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub timestamp: String,
}

impl ErrorBody {
    pub fn from_error(err: &EngineError, now: DateTime<Utc>) -> Self {
        Self {
            error: err.public_message(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
