//! Error types and handling for the hub-and-spoke planner

use thiserror::Error;

/// Main error type for fetching and presenting ranked hotels
#[derive(Error, Debug)]
pub enum HubSpokeError {
    /// Missing credential or invalid settings, raised before any request is made
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport, authentication, parse or schema failure from the ranking service
    #[error("Request failed: {message}")]
    RequestFailure { message: String },

    /// The ranking service answered without any content
    #[error("Empty response from ranking service")]
    EmptyResponse,
}

impl HubSpokeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new request failure
    pub fn request_failure<S: Into<String>>(message: S) -> Self {
        Self::RequestFailure {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            HubSpokeError::Config { message } => message.clone(),
            HubSpokeError::RequestFailure { message } => message.clone(),
            HubSpokeError::EmptyResponse => "Empty response from AI model.".to_string(),
        }
    }
}

impl From<serde_json::Error> for HubSpokeError {
    fn from(err: serde_json::Error) -> Self {
        Self::request_failure(format!("Malformed ranking response: {err}"))
    }
}
