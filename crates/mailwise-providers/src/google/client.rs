//! Gmail API client.
//!
//! Low-level HTTP access to `users.messages.list` and `users.messages.get`
//! for the authenticated user (`me`).

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};

use super::api::{ListMessagesResponse, Message};
use super::config::GoogleConfig;

/// The Gmail user id that refers to the token's owner.
const ME: &str = "me";

/// Gmail API client.
#[derive(Debug)]
pub struct GmailClient {
    http_client: reqwest::Client,
    api_base: String,
}

impl GmailClient {
    /// Creates a new Gmail client from the provider configuration.
    pub fn new(config: &GoogleConfig) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Lists the ids of the most recent messages, newest first.
    pub async fn list_message_ids(
        &self,
        access_token: &str,
        max_results: u32,
    ) -> ProviderResult<Vec<String>> {
        let url = format!("{}/users/{}/messages", self.api_base, ME);

        let request = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("maxResults", max_results.to_string())]);

        let list: ListMessagesResponse = self.send(request, "list messages").await?;

        let ids: Vec<String> = list.messages.into_iter().map(|m| m.id).collect();
        debug!("listed {} message ids", ids.len());
        Ok(ids)
    }

    /// Fetches a single message in `full` format.
    pub async fn get_message(&self, access_token: &str, id: &str) -> ProviderResult<Message> {
        let url = format!(
            "{}/users/{}/messages/{}",
            self.api_base,
            ME,
            urlencoding::encode(id)
        );

        let request = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("format", "full")]);

        self.send(request, "get message").await
    }

    /// Sends a request and decodes a JSON success body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> ProviderResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::from(e).with_provider("gmail"))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(ProviderError::rate_limited(format!(
                "{}: rate limit exceeded{}",
                operation,
                retry_after
                    .map(|s| format!(", retry after {} seconds", s))
                    .unwrap_or_default()
            ))
            .with_provider("gmail"));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(
                ProviderError::from_status(status.as_u16(), operation, &body)
                    .with_provider("gmail"),
            );
        }

        let body = response.text().await.map_err(|e| {
            ProviderError::network(format!("failed to read response: {}", e))
                .with_provider("gmail")
        })?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("{}: failed to parse response: {}", operation, e))
                .with_provider("gmail")
        })
    }
}
