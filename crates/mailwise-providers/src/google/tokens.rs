//! OAuth token set and the in-memory credential slot.
//!
//! Tokens live only for the lifetime of the process. Each successful code
//! exchange replaces the stored set wholesale.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Seconds shaved off `expires_in` so a token is not used right at its edge.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Information about an OAuth token set.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// The access token for API requests.
    pub access_token: String,

    /// The refresh token, when the provider issued one.
    pub refresh_token: Option<String>,

    /// When the access token expires.
    pub expires_at: Option<DateTime<Utc>>,

    /// The OAuth scopes that were granted.
    pub scopes: Vec<String>,

    /// Token type reported by the provider (normally "Bearer").
    pub token_type: Option<String>,

    /// OpenID Connect id token, present when `openid` was granted.
    pub id_token: Option<String>,

    /// When the tokens were obtained.
    pub obtained_at: DateTime<Utc>,
}

impl TokenInfo {
    /// Creates a new token info from OAuth response data.
    ///
    /// A lifetime too large to represent is treated as no expiry.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        expires_in_secs: Option<i64>,
        scopes: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_at: expires_in_secs.and_then(|secs| expiry_from(now, secs)),
            scopes,
            token_type: None,
            id_token: None,
            obtained_at: now,
        }
    }

    /// Sets the token type.
    pub fn with_token_type(mut self, token_type: Option<String>) -> Self {
        self.token_type = token_type;
        self
    }

    /// Sets the id token.
    pub fn with_id_token(mut self, id_token: Option<String>) -> Self {
        self.id_token = id_token;
        self
    }

    /// Returns true if the access token is expired or about to expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }
}

/// Absolute expiry for a lifetime of `secs` seconds starting at `now`.
///
/// The skew only applies to lifetimes longer than the skew itself, so a
/// short-lived token is still usable right after the exchange.
fn expiry_from(now: DateTime<Utc>, secs: i64) -> Option<DateTime<Utc>> {
    let lifetime = if secs > EXPIRY_SKEW_SECS {
        secs - EXPIRY_SKEW_SECS
    } else {
        secs.max(0)
    };
    Duration::try_seconds(lifetime).and_then(|d| now.checked_add_signed(d))
}

// Token values never reach Debug output (and therefore the logs).
impl std::fmt::Debug for TokenInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenInfo")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .field("scopes", &self.scopes)
            .field("token_type", &self.token_type)
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

/// Why the credential slot holds nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// No exchange has completed yet.
    Missing,
    /// A token set is stored but its access token has expired.
    Expired,
}

/// Process-wide slot for the most recently obtained token set.
///
/// Shared by all handlers; the last successful exchange wins.
#[derive(Debug, Default)]
pub struct CredentialStore {
    tokens: RwLock<Option<TokenInfo>>,
}

impl CredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the current tokens, if any.
    pub async fn get(&self) -> Option<TokenInfo> {
        self.tokens.read().await.clone()
    }

    /// Replaces the stored tokens, returning the previous set.
    pub async fn set(&self, tokens: TokenInfo) -> Option<TokenInfo> {
        let previous = self.tokens.write().await.replace(tokens);
        if previous.is_some() {
            info!("replaced previously stored credentials");
        } else {
            debug!("stored first credentials");
        }
        previous
    }

    /// Returns the stored tokens if they can be used, or why they cannot.
    pub async fn usable(&self) -> Result<TokenInfo, CredentialStatus> {
        match self.tokens.read().await.as_ref() {
            None => Err(CredentialStatus::Missing),
            Some(t) if t.is_expired() => Err(CredentialStatus::Expired),
            Some(t) => Ok(t.clone()),
        }
    }
}
