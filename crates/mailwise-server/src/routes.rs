//! HTTP routes.
//!
//! | Route                 | Success                    | Failure          |
//! |-----------------------|----------------------------|------------------|
//! | `GET /`               | 200 banner                 |                  |
//! | `GET /auth`           | 302 to the consent page    |                  |
//! | `GET /oauth2callback` | 200 confirmation           | 400, 500         |
//! | `GET /emails`         | 200 JSON array             | 401, 500         |

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use mailwise_core::EmailSummary;
use mailwise_providers::fetch_recent_emails;

use crate::error::ApiError;
use crate::state::SharedState;

/// Body of `GET /`.
pub const BANNER: &str = "📩 MailWise Backend is Running!";

/// Body of a successful callback.
pub const OAUTH_SUCCESS_MESSAGE: &str = "✅ OAuth Success! You can now call /emails";

/// Builds the application router.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/auth", get(start_auth))
        .route("/oauth2callback", get(oauth_callback))
        .route("/emails", get(list_emails))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / - health check
async fn banner() -> &'static str {
    BANNER
}

/// GET /auth - redirect the browser to the consent page
async fn start_auth(State(state): State<SharedState>) -> impl IntoResponse {
    let url = state.provider.authorization_url();
    info!(provider = state.provider.name(), "redirecting to consent page");
    debug!(%url, "authorization URL");
    (StatusCode::FOUND, [(header::LOCATION, url)])
}

/// Query parameters Google appends to the redirect URI.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// GET /oauth2callback - exchange the code and store the tokens
async fn oauth_callback(
    State(state): State<SharedState>,
    Query(params): Query<CallbackParams>,
) -> Result<&'static str, ApiError> {
    let CallbackParams { code, error } = params;

    let Some(code) = code.filter(|c| !c.is_empty()) else {
        if let Some(error) = error {
            warn!(%error, "provider reported an authorization error");
        }
        return Err(ApiError::MissingCode);
    };

    let tokens = state
        .provider
        .exchange_code(&code)
        .await
        .map_err(ApiError::TokenExchange)?;

    state.credentials.set(tokens).await;
    info!("OAuth callback completed");
    Ok(OAUTH_SUCCESS_MESSAGE)
}

/// GET /emails - summaries of the most recent messages
async fn list_emails(
    State(state): State<SharedState>,
) -> Result<Json<Vec<EmailSummary>>, ApiError> {
    let token = state
        .credentials
        .usable()
        .await
        .map_err(ApiError::NotAuthenticated)?;

    let emails = fetch_recent_emails(state.provider.as_ref(), &token, state.email_limit)
        .await
        .map_err(ApiError::Retrieval)?;

    Ok(Json(emails))
}
