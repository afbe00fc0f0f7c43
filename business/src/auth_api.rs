//! Client for the authentication service.

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::CredentialPayload;
use crate::http::{Client, HttpError};

const GENERIC_FAILURE: &str = "Unable to sign in right now. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// The service rejected the credentials or reported its own failure.
    #[error("authentication failed: {message}")]
    Authentication { message: String },
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),
    /// A success status without a usable token.
    #[error("invalid response from authentication service: {0}")]
    InvalidResponse(String),
}

impl LoginError {
    /// Text shown in the sign-in error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication { message } => message.clone(),
            Self::Transport(_) | Self::InvalidResponse(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, alias = "message")]
    error_message: Option<String>,
}

/// `POST {api_url}/auth/login` with `{"email", "password"}`; returns the session token.
pub async fn login(api_url: &str, payload: &CredentialPayload) -> Result<String, LoginError> {
    let url = format!("{api_url}/auth/login");
    info!("login: POST {url} for {}", payload.email);

    let response = Client::post(url)
        .header("accept", "application/json")
        .json(payload)?
        .send()
        .await?;

    let body: LoginResponse = response.json().unwrap_or_else(|e| {
        warn!("login: unreadable response body (status {}): {e}", response.status);
        LoginResponse::default()
    });

    if !response.is_success() {
        let message = body
            .error_message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback_message(response.status));
        return Err(LoginError::Authentication { message });
    }

    match (body.token, body.error_message) {
        (Some(token), _) if !token.is_empty() => Ok(token),
        (_, Some(message)) if !message.is_empty() => Err(LoginError::Authentication { message }),
        _ => Err(LoginError::InvalidResponse(format!(
            "status {} without a token",
            response.status
        ))),
    }
}

fn fallback_message(status: u16) -> String {
    match status {
        400 | 401 | 403 => "Invalid credentials".to_string(),
        _ => format!("Server error (status {status})"),
    }
}
