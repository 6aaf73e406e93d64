//! OAuth 2.0 authorization code flow against Google's endpoints.
//!
//! The service runs as a web application: the user's browser is redirected
//! to the consent page, Google calls back on the registered redirect URI
//! with a `code`, and the server trades that code for tokens here.

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ProviderError, ProviderResult};

use super::config::{GoogleConfig, OAuthCredentials};
use super::tokens::TokenInfo;

/// OAuth client for Google APIs.
#[derive(Debug)]
pub struct OAuthClient {
    credentials: OAuthCredentials,
    redirect_uri: String,
    scopes: Vec<String>,
    auth_endpoint: String,
    token_endpoint: String,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates a new OAuth client from the provider configuration.
    pub fn new(config: &GoogleConfig) -> ProviderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            credentials: config.credentials.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scopes: config.scopes.clone(),
            auth_endpoint: config.auth_endpoint.clone(),
            token_endpoint: config.token_endpoint.clone(),
            http_client,
        })
    }

    /// Builds the consent page URL.
    ///
    /// Always asks for offline access and forces the consent prompt so a
    /// refresh token is issued on every authorization.
    pub fn authorization_url(&self) -> String {
        build_auth_url(
            &self.auth_endpoint,
            &self.credentials.client_id,
            &self.redirect_uri,
            &self.scopes,
        )
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// - network error if the token endpoint is unreachable
    /// - authentication / bad request error if Google rejects the code
    /// - invalid response error if the body is not a token response
    pub async fn exchange_code(&self, code: &str) -> ProviderResult<TokenInfo> {
        let params = [
            ("code", code),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        debug!(endpoint = %self.token_endpoint, "exchanging authorization code");

        let response = self
            .http_client
            .post(&self.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderError::from(e).with_provider("google"))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(
                ProviderError::from_status(status.as_u16(), "token exchange failed", &body)
                    .with_provider("google"),
            );
        }

        let token_response: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::invalid_response(format!("invalid token response: {}", e))
                .with_provider("google")
        })?;

        let tokens = token_response.into_token_info(&self.scopes);
        info!(
            scopes = ?tokens.scopes,
            expires_at = ?tokens.expires_at,
            has_refresh_token = tokens.refresh_token.is_some(),
            "successfully obtained tokens"
        );
        Ok(tokens)
    }
}

/// Builds a Google OAuth authorization URL.
pub fn build_auth_url(
    auth_endpoint: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[String],
) -> String {
    let scope = scopes.join(" ");

    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&\
        access_type=offline&prompt=consent",
        auth_endpoint,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(&scope),
    )
}

/// Response from Google's token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Space-separated scopes actually granted.
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

impl TokenResponse {
    fn into_token_info(self, requested: &[String]) -> TokenInfo {
        let scopes = match self.scope.as_deref() {
            Some(granted) if !granted.trim().is_empty() => {
                granted.split_whitespace().map(str::to_string).collect()
            }
            _ => requested.to_vec(),
        };

        TokenInfo::new(self.access_token, self.refresh_token, self.expires_in, scopes)
            .with_token_type(self.token_type)
            .with_id_token(self.id_token)
    }
}
