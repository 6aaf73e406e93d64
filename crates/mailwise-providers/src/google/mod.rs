//! Google OAuth + Gmail provider implementation.
//!
//! # Authentication Flow
//!
//! 1. The operator registers a web OAuth client and configures its id,
//!    secret and redirect URI
//! 2. `/auth` redirects the browser to Google's consent page
//! 3. Google redirects back to the redirect URI with a `code`
//! 4. The code is exchanged for access and refresh tokens
//! 5. Tokens are kept in a [`CredentialStore`] for later Gmail reads
//!
//! # Example
//!
//! ```ignore
//! use mailwise_providers::google::{GmailProvider, GoogleConfig, OAuthCredentials};
//!
//! let credentials = OAuthCredentials::new("id.apps.googleusercontent.com", "secret");
//! let provider = GmailProvider::new(GoogleConfig::new(
//!     credentials,
//!     "http://localhost:5000/oauth2callback",
//! ))?;
//! let url = provider.authorization_url();
//! ```

mod api;
mod client;
mod config;
mod oauth;
mod provider;
mod tokens;

pub use api::{Header, ListMessagesResponse, Message, MessagePart, MessagePartBody, MessageRef};
pub use client::GmailClient;
pub use config::{
    DEFAULT_SCOPES, GMAIL_API_BASE, GOOGLE_AUTH_URL, GOOGLE_TOKEN_URL, GoogleConfig,
    OAuthCredentials,
};
pub use oauth::{OAuthClient, build_auth_url};
pub use provider::GmailProvider;
pub use tokens::{CredentialStatus, CredentialStore, TokenInfo};
