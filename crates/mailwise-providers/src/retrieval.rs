//! Recent-message retrieval.

use tracing::{debug, info};

use mailwise_core::EmailSummary;

use crate::error::ProviderResult;
use crate::extract::summarize_message;
use crate::google::TokenInfo;
use crate::provider::MailProvider;

/// How many messages `/emails` returns.
pub const RECENT_EMAIL_LIMIT: u32 = 5;

/// Lists up to `limit` recent messages and summarizes each one.
///
/// Messages are fetched one at a time, in the order the provider listed
/// them, and the result keeps that order. The first failure aborts the
/// whole call; summaries gathered so far are dropped.
pub async fn fetch_recent_emails(
    provider: &dyn MailProvider,
    token: &TokenInfo,
    limit: u32,
) -> ProviderResult<Vec<EmailSummary>> {
    let ids = provider.list_message_ids(token, limit).await?;
    debug!(provider = provider.name(), count = ids.len(), "listed recent messages");

    let mut emails = Vec::with_capacity(ids.len());
    for id in &ids {
        let message = provider.get_message(token, id).await?;
        emails.push(summarize_message(&message));
    }

    info!(count = emails.len(), "fetched recent emails");
    Ok(emails)
}
