// ABOUTME: Custom error types for GitHub SDK with user-friendly messages
// ABOUTME: Maps HTTP status codes and transport failures to typed errors

use crate::constants::errors;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{action}: {status}{}", status_hint(.status))]
    Status { action: String, status: StatusCode },

    #[error("Invalid API response: {0}")]
    Decode(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: Request took too long to complete")]
    Timeout,
}

fn status_hint(status: &StatusCode) -> String {
    if *status == StatusCode::UNAUTHORIZED {
        format!("\n\t{}", errors::UNAUTHORIZED_HINT)
    } else {
        String::new()
    }
}

impl GithubError {
    pub fn missing_token() -> Self {
        GithubError::Configuration(format!(
            "{} is not set in the environment or contains a blank value",
            errors::TOKEN_ENV_VAR
        ))
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            GithubError::Configuration(_) => Some(
                "Create a token at https://github.com/settings/tokens and export it as GITHUB_TOKEN",
            ),
            GithubError::Status { status, .. } if *status == StatusCode::NOT_FOUND => {
                Some("Check the owner, repository and issue number")
            }
            GithubError::Network(_) => Some("Check your internet connection and try again"),
            GithubError::Timeout => Some("Try again or check your network connection"),
            _ => None,
        }
    }

    /// HTTP status of a rejected request, if any
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GithubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GithubError::Timeout
        } else if err.is_decode() {
            GithubError::Decode(err.to_string())
        } else {
            GithubError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GithubError {
    fn from(err: serde_json::Error) -> Self {
        GithubError::Decode(err.to_string())
    }
}
