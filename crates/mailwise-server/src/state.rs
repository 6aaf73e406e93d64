//! Application state shared across all requests.

use std::sync::Arc;

use mailwise_providers::{CredentialStore, MailProvider, RECENT_EMAIL_LIMIT};

/// State handed to every handler through axum's `State` extractor.
pub struct AppState {
    /// Upstream identity provider and mail API.
    pub provider: Arc<dyn MailProvider>,
    /// Slot for the most recently obtained token set.
    pub credentials: CredentialStore,
    /// How many messages `/emails` lists.
    pub email_limit: u32,
}

impl AppState {
    /// Creates state with an empty credential slot.
    pub fn new(provider: Arc<dyn MailProvider>) -> Self {
        Self {
            provider,
            credentials: CredentialStore::new(),
            email_limit: RECENT_EMAIL_LIMIT,
        }
    }
}

/// Shared state wrapped in Arc.
pub type SharedState = Arc<AppState>;

/// Creates a new shared state around the given provider.
pub fn new_shared_state(provider: Arc<dyn MailProvider>) -> SharedState {
    Arc::new(AppState::new(provider))
}
