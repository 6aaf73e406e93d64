//! MailProvider trait and the Google OAuth / Gmail implementation.
//!
//! - [`MailProvider`] - what the HTTP surface needs from an upstream
//! - [`google::GmailProvider`] - Google OAuth 2.0 + Gmail API v1
//! - [`summarize_message`] - Gmail message to [`mailwise_core::EmailSummary`]
//! - [`fetch_recent_emails`] - list, fetch sequentially, summarize
//! - [`ProviderError`] - error type for all of the above
//!
//! ```text
//!  /auth ──────────► authorization_url()
//!  /oauth2callback ─► exchange_code() ──► CredentialStore
//!  /emails ─────────► fetch_recent_emails()
//!                        ├─ list_message_ids()
//!                        └─ get_message() × N ──► summarize_message()
//! ```

pub mod error;
pub mod extract;
pub mod google;
pub mod provider;
pub mod retrieval;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use extract::{decode_body_data, extract_body, header_value, summarize_message};
pub use google::{CredentialStatus, CredentialStore, GmailProvider, GoogleConfig, TokenInfo};
pub use provider::{BoxFuture, MailProvider};
pub use retrieval::{RECENT_EMAIL_LIMIT, fetch_recent_emails};
