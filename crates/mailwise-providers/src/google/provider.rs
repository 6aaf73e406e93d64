//! Gmail provider implementation.
//!
//! This module implements the [`MailProvider`] trait on top of Google's
//! OAuth endpoints and the Gmail API v1.

use crate::error::{ProviderError, ProviderResult};
use crate::provider::{BoxFuture, MailProvider};

use super::api::Message;
use super::client::GmailClient;
use super::config::GoogleConfig;
use super::oauth::OAuthClient;
use super::tokens::TokenInfo;

/// Gmail provider.
///
/// Stateless apart from its HTTP clients: tokens are passed in by the
/// caller on every read.
#[derive(Debug)]
pub struct GmailProvider {
    oauth_client: OAuthClient,
    api_client: GmailClient,
}

impl GmailProvider {
    /// Creates a new Gmail provider with the given configuration.
    pub fn new(config: GoogleConfig) -> ProviderResult<Self> {
        config.validate().map_err(ProviderError::configuration)?;

        let oauth_client = OAuthClient::new(&config)?;
        let api_client = GmailClient::new(&config)?;

        Ok(Self {
            oauth_client,
            api_client,
        })
    }
}

impl MailProvider for GmailProvider {
    fn name(&self) -> &str {
        "gmail"
    }

    fn authorization_url(&self) -> String {
        self.oauth_client.authorization_url()
    }

    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, ProviderResult<TokenInfo>> {
        Box::pin(self.oauth_client.exchange_code(code))
    }

    fn list_message_ids<'a>(
        &'a self,
        token: &'a TokenInfo,
        max_results: u32,
    ) -> BoxFuture<'a, ProviderResult<Vec<String>>> {
        Box::pin(
            self.api_client
                .list_message_ids(&token.access_token, max_results),
        )
    }

    fn get_message<'a>(
        &'a self,
        token: &'a TokenInfo,
        id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Message>> {
        Box::pin(self.api_client.get_message(&token.access_token, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use crate::google::config::OAuthCredentials;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config() -> GoogleConfig {
        GoogleConfig::new(
            OAuthCredentials::new("client.apps.googleusercontent.com", "secret"),
            "http://localhost:5000/oauth2callback",
        )
    }

    #[test]
    fn rejects_invalid_config() {
        let err = GmailProvider::new(GoogleConfig::new(
            OAuthCredentials::new("", "secret"),
            "http://localhost/cb",
        ))
        .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
    }

    #[test]
    fn name_and_auth_url() {
        let provider = GmailProvider::new(config()).unwrap();
        assert_eq!(provider.name(), "gmail");
        assert!(provider.authorization_url().contains("prompt=consent"));
    }

    #[tokio::test]
    async fn exchange_then_read_through_trait_object() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.x",
                "expires_in": 3600
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/gmail/v1/users/me/messages"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"messages": [{"id": "m1"}]})),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/gmail/v1/users/me/messages/m1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "m1"})))
            .mount(&server)
            .await;

        let provider: Box<dyn MailProvider> = Box::new(
            GmailProvider::new(
                config()
                    .with_token_endpoint(format!("{}/token", server.uri()))
                    .with_api_base(format!("{}/gmail/v1", server.uri())),
            )
            .unwrap(),
        );

        let token = provider.exchange_code("code").await.unwrap();
        let ids = provider.list_message_ids(&token, 5).await.unwrap();
        assert_eq!(ids, vec!["m1"]);
        let message = provider.get_message(&token, &ids[0]).await.unwrap();
        assert_eq!(message.id, "m1");
    }
}
