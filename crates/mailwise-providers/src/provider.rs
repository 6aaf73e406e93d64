//! MailProvider trait definition.
//!
//! A [`MailProvider`] is the upstream collaborator of the HTTP surface: it
//! knows how to send a user to the consent page, trade the returned code
//! for tokens, and read messages with those tokens.

use std::future::Future;
use std::pin::Pin;

use crate::error::ProviderResult;
use crate::google::{Message, TokenInfo};

/// A boxed future for async trait methods.
///
/// Keeps the trait object-safe so the server can hold an
/// `Arc<dyn MailProvider>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The operations the service needs from an identity provider plus mail API.
///
/// Implementations must be `Send + Sync`; one instance is shared by all
/// request handlers.
pub trait MailProvider: Send + Sync {
    /// Returns the name of this provider (e.g., "gmail").
    fn name(&self) -> &str;

    /// Builds the URL of the provider's consent page.
    ///
    /// The URL requests offline access, forces the consent prompt and
    /// carries the provider's fixed scope set.
    fn authorization_url(&self) -> String;

    /// Exchanges an authorization code for a token set.
    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, ProviderResult<TokenInfo>>;

    /// Lists up to `max_results` message ids, most recent first.
    fn list_message_ids<'a>(
        &'a self,
        token: &'a TokenInfo,
        max_results: u32,
    ) -> BoxFuture<'a, ProviderResult<Vec<String>>>;

    /// Fetches one message with headers and body parts.
    fn get_message<'a>(
        &'a self,
        token: &'a TokenInfo,
        id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Message>>;
}
