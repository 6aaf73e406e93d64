//! HTTP surface for mailwise.
//!
//! Four routes over a shared [`AppState`]:
//! - `GET /auth` redirects to Google's consent page
//! - `GET /oauth2callback` exchanges the code and stores the tokens
//! - `GET /emails` returns the five most recent messages as JSON
//! - `GET /` is a health banner
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mailwise_providers::GmailProvider;
//! use mailwise_providers::google::{GoogleConfig, OAuthCredentials};
//! use mailwise_server::{HttpServer, ServerConfig, create_router, new_shared_state, shutdown_signal};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let google = GoogleConfig::new(
//!         OAuthCredentials::new("id.apps.googleusercontent.com", "secret"),
//!         "http://localhost:5000/oauth2callback",
//!     );
//!     let config = ServerConfig::new(google.clone());
//!     let state = new_shared_state(Arc::new(GmailProvider::new(google)?));
//!
//!     let server = HttpServer::bind(&config).await?;
//!     server.run_until_shutdown(create_router(state), shutdown_signal()).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
mod config;
mod error;
mod routes;
mod server;
mod signals;
mod state;

pub use config::{DEFAULT_PORT, ServerConfig};
pub use error::{
    ApiError, MISSING_CODE_MESSAGE, NOT_AUTHENTICATED_MESSAGE, RETRIEVAL_MESSAGE, ServerError,
    ServerResult, TOKEN_EXCHANGE_MESSAGE,
};
pub use routes::{BANNER, CallbackParams, OAUTH_SUCCESS_MESSAGE, create_router};
pub use server::HttpServer;
pub use signals::shutdown_signal;
pub use state::{AppState, SharedState, new_shared_state};
