//! The normalized email record returned to HTTP callers.

use serde::{Deserialize, Serialize};

/// Subject used when a message carries no `Subject` header.
pub const NO_SUBJECT: &str = "(No Subject)";

/// Sender used when a message carries no `From` header.
pub const UNKNOWN_SENDER: &str = "(Unknown Sender)";

/// A flattened view of one mail message.
///
/// Serializes as `{"subject": .., "from": .., "body": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailSummary {
    /// The `Subject` header, or [`NO_SUBJECT`].
    pub subject: String,
    /// The `From` header, or [`UNKNOWN_SENDER`].
    pub from: String,
    /// Decoded plain-text body; empty when none was found.
    pub body: String,
}

impl EmailSummary {
    /// Creates a summary, substituting placeholders for missing headers.
    pub fn new(subject: Option<String>, from: Option<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.unwrap_or_else(|| NO_SUBJECT.to_string()),
            from: from.unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
            body: body.into(),
        }
    }
}
