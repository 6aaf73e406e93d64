//! Router tests against an in-memory provider.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use mailwise_core::EmailSummary;
use mailwise_providers::google::{Header, Message, MessagePart, MessagePartBody};
use mailwise_providers::{
    BoxFuture, MailProvider, ProviderError, ProviderErrorCode, ProviderResult, TokenInfo,
};
use mailwise_server::{
    AppState, BANNER, MISSING_CODE_MESSAGE, OAUTH_SUCCESS_MESSAGE, SharedState,
    TOKEN_EXCHANGE_MESSAGE, create_router,
};

const CONSENT_URL: &str = "https://accounts.example.com/o/oauth2/v2/auth?client_id=test";

#[derive(Default)]
struct FakeProvider {
    /// code -> access token; unknown codes are rejected
    codes: HashMap<String, String>,
    ids: Vec<String>,
    messages: HashMap<String, Message>,
    fail_on: Option<String>,
    exchanged: Mutex<Vec<String>>,
    fetched: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn with_code(mut self, code: &str, access_token: &str) -> Self {
        self.codes.insert(code.to_string(), access_token.to_string());
        self
    }

    fn with_message(mut self, id: &str, subject: &str, from: &str, body: &str) -> Self {
        let data = URL_SAFE_NO_PAD.encode(body);
        let message = Message {
            id: id.to_string(),
            payload: Some(MessagePart {
                mime_type: Some("text/plain".into()),
                headers: vec![Header::new("Subject", subject), Header::new("From", from)],
                body: Some(MessagePartBody {
                    data: Some(data),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        self.ids.push(id.to_string());
        self.messages.insert(id.to_string(), message);
        self
    }

    fn failing_on(mut self, id: &str) -> Self {
        self.fail_on = Some(id.to_string());
        self
    }
}

impl MailProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn authorization_url(&self) -> String {
        CONSENT_URL.to_string()
    }

    fn exchange_code<'a>(&'a self, code: &'a str) -> BoxFuture<'a, ProviderResult<TokenInfo>> {
        Box::pin(async move {
            self.exchanged.lock().unwrap().push(code.to_string());
            match self.codes.get(code) {
                Some(access) => Ok(TokenInfo::new(access.clone(), None, Some(3600), vec![])),
                None => Err(
                    ProviderError::new(ProviderErrorCode::BadRequest, "invalid_grant")
                        .with_provider("fake"),
                ),
            }
        })
    }

    fn list_message_ids<'a>(
        &'a self,
        _token: &'a TokenInfo,
        max_results: u32,
    ) -> BoxFuture<'a, ProviderResult<Vec<String>>> {
        Box::pin(async move {
            Ok(self
                .ids
                .iter()
                .take(max_results as usize)
                .cloned()
                .collect())
        })
    }

    fn get_message<'a>(
        &'a self,
        _token: &'a TokenInfo,
        id: &'a str,
    ) -> BoxFuture<'a, ProviderResult<Message>> {
        Box::pin(async move {
            self.fetched.lock().unwrap().push(id.to_string());
            if self.fail_on.as_deref() == Some(id) {
                return Err(ProviderError::server("backend error").with_provider("fake"));
            }
            self.messages
                .get(id)
                .cloned()
                .ok_or_else(|| ProviderError::not_found(id).with_provider("fake"))
        })
    }
}

fn state_for(provider: FakeProvider) -> (SharedState, Arc<FakeProvider>) {
    let provider = Arc::new(provider);
    let state = Arc::new(AppState::new(provider.clone()));
    (state, provider)
}

async fn get(state: &SharedState, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = create_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body.to_vec())
}

fn text(body: &[u8]) -> &str {
    std::str::from_utf8(body).unwrap()
}

#[tokio::test]
async fn root_returns_banner() {
    let (state, _) = state_for(FakeProvider::default());
    let (status, _, body) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text(&body), BANNER);
}

#[tokio::test]
async fn auth_redirects_to_consent_page() {
    let (state, _) = state_for(FakeProvider::default());
    let (status, headers, _) = get(&state, "/auth").await;
    assert_eq!(status, StatusCode::FOUND);
    assert_eq!(headers.get(header::LOCATION).unwrap(), CONSENT_URL);
}

#[tokio::test]
async fn callback_without_code_is_rejected() {
    let (state, provider) = state_for(FakeProvider::default().with_code("good", "tok"));

    for uri in [
        "/oauth2callback",
        "/oauth2callback?code=",
        "/oauth2callback?error=access_denied",
    ] {
        let (status, _, body) = get(&state, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(text(&body), MISSING_CODE_MESSAGE);
    }

    assert!(provider.exchanged.lock().unwrap().is_empty());
    assert!(state.credentials.get().await.is_none());
}

#[tokio::test]
async fn callback_stores_tokens() {
    let (state, provider) = state_for(FakeProvider::default().with_code("good", "tok-1"));

    let (status, _, body) = get(&state, "/oauth2callback?code=good").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text(&body), OAUTH_SUCCESS_MESSAGE);
    assert_eq!(*provider.exchanged.lock().unwrap(), vec!["good"]);
    assert_eq!(state.credentials.get().await.unwrap().access_token, "tok-1");
}

#[tokio::test]
async fn second_callback_replaces_tokens() {
    let (state, _) = state_for(
        FakeProvider::default()
            .with_code("first", "tok-1")
            .with_code("second", "tok-2"),
    );

    get(&state, "/oauth2callback?code=first").await;
    get(&state, "/oauth2callback?code=second").await;

    assert_eq!(state.credentials.get().await.unwrap().access_token, "tok-2");
}

#[tokio::test]
async fn failed_exchange_keeps_previous_tokens() {
    let (state, _) = state_for(FakeProvider::default().with_code("good", "tok-1"));

    get(&state, "/oauth2callback?code=good").await;
    let (status, _, body) = get(&state, "/oauth2callback?code=bad").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text(&body), TOKEN_EXCHANGE_MESSAGE);
    assert!(!text(&body).contains("invalid_grant"));
    assert_eq!(state.credentials.get().await.unwrap().access_token, "tok-1");
}

#[tokio::test]
async fn emails_require_authentication() {
    let (state, provider) = state_for(FakeProvider::default().with_message("a", "s", "f", "b"));

    let (status, _, body) = get(&state, "/emails").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, json!({"error": "Not authenticated. Visit /auth first."}));
    assert!(provider.fetched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn emails_with_expired_tokens_are_rejected() {
    let (state, provider) = state_for(FakeProvider::default().with_message("a", "s", "f", "b"));
    let mut token = TokenInfo::new("old", None, Some(3600), vec![]);
    token.expires_at = Some(token.obtained_at);
    state.credentials.set(token).await;

    let (status, _, _) = get(&state, "/emails").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(provider.fetched.lock().unwrap().is_empty());
}

#[tokio::test]
async fn emails_returned_in_list_order() {
    let provider = FakeProvider::default()
        .with_code("good", "tok")
        .with_message("m3", "Third", "carol@example.com", "three")
        .with_message("m2", "Second", "bob@example.com", "two")
        .with_message("m1", "First", "alice@example.com", "one");
    let (state, provider) = state_for(provider);
    get(&state, "/oauth2callback?code=good").await;

    let (status, _, body) = get(&state, "/emails").await;
    assert_eq!(status, StatusCode::OK);

    let emails: Vec<EmailSummary> = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        emails,
        vec![
            EmailSummary::new(Some("Third".into()), Some("carol@example.com".into()), "three"),
            EmailSummary::new(Some("Second".into()), Some("bob@example.com".into()), "two"),
            EmailSummary::new(Some("First".into()), Some("alice@example.com".into()), "one"),
        ]
    );
    assert_eq!(*provider.fetched.lock().unwrap(), vec!["m3", "m2", "m1"]);
}

#[tokio::test]
async fn emails_capped_at_five() {
    let mut provider = FakeProvider::default().with_code("good", "tok");
    for i in 0..7 {
        let id = format!("m{}", i);
        provider = provider.with_message(&id, "s", "f", "b");
    }
    let (state, _) = state_for(provider);
    get(&state, "/oauth2callback?code=good").await;

    let (_, _, body) = get(&state, "/emails").await;
    let emails: Vec<Value> = serde_json::from_slice(&body).unwrap();
    assert_eq!(emails.len(), 5);
}

#[tokio::test]
async fn empty_mailbox_is_empty_array() {
    let (state, _) = state_for(FakeProvider::default().with_code("good", "tok"));
    get(&state, "/oauth2callback?code=good").await;

    let (status, _, body) = get(&state, "/emails").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text(&body), "[]");
}

#[tokio::test]
async fn failing_fetch_returns_no_partial_data() {
    let provider = FakeProvider::default()
        .with_code("good", "tok")
        .with_message("m1", "s", "f", "b")
        .with_message("m2", "s", "f", "b")
        .with_message("m3", "s", "f", "b")
        .failing_on("m2");
    let (state, provider) = state_for(provider);
    get(&state, "/oauth2callback?code=good").await;

    let (status, _, body) = get(&state, "/emails").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value, json!({"error": "Failed to fetch emails"}));
    assert_eq!(*provider.fetched.lock().unwrap(), vec!["m1", "m2"]);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (state, _) = state_for(FakeProvider::default());
    let response = create_router(state)
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
