//! Server error types.
//!
//! [`ServerError`] covers startup and listener failures. [`ApiError`] is what
//! route handlers return; it logs the full detail and hands the caller only
//! a status code and a short message.

use std::io;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use mailwise_core::TracingError;
use mailwise_providers::{CredentialStatus, ProviderError};

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (bind, accept).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Provider construction failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Logging could not be initialized.
    #[error("Tracing error: {0}")]
    Tracing(#[from] TracingError),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Plain-text body for a callback without a code.
pub const MISSING_CODE_MESSAGE: &str = "❌ No code in query";

/// Plain-text body for a failed code exchange.
pub const TOKEN_EXCHANGE_MESSAGE: &str = "❌ OAuth failed. Check console.";

/// JSON `error` value when `/emails` is called without usable credentials.
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated. Visit /auth first.";

/// JSON `error` value for a failed retrieval.
pub const RETRIEVAL_MESSAGE: &str = "Failed to fetch emails";

/// Errors returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The OAuth callback arrived without an authorization code.
    #[error("authorization code missing from callback")]
    MissingCode,

    /// The provider rejected the code or could not be reached.
    #[error("token exchange failed: {0}")]
    TokenExchange(#[source] ProviderError),

    /// `/emails` was called before a usable token was stored.
    #[error("no usable credentials ({0:?})")]
    NotAuthenticated(CredentialStatus),

    /// Listing or fetching messages failed.
    #[error("email retrieval failed: {0}")]
    Retrieval(#[source] ProviderError),
}

impl ApiError {
    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingCode => StatusCode::BAD_REQUEST,
            Self::NotAuthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::TokenExchange(_) | Self::Retrieval(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::MissingCode => {
                warn!("OAuth callback without code");
                (status, MISSING_CODE_MESSAGE).into_response()
            }
            Self::TokenExchange(e) => {
                error!(error = %e, code = %e.code(), "OAuth token exchange failed");
                (status, TOKEN_EXCHANGE_MESSAGE).into_response()
            }
            Self::NotAuthenticated(credentials) => {
                warn!(?credentials, "emails requested without usable credentials");
                (status, Json(json!({ "error": NOT_AUTHENTICATED_MESSAGE }))).into_response()
            }
            Self::Retrieval(e) => {
                error!(error = %e, code = %e.code(), "error fetching emails");
                (status, Json(json!({ "error": RETRIEVAL_MESSAGE }))).into_response()
            }
        }
    }
}
