//! Gmail message to [`EmailSummary`] extraction.
//!
//! Header lookup is exact and case-sensitive. The body is the first
//! `text/plain` part one level down for multipart messages, or the
//! top-level body for single-part ones. Nested multiparts and HTML-only
//! messages yield an empty body.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use tracing::warn;

use mailwise_core::EmailSummary;

use crate::google::{Header, Message, MessagePart};

/// Base64url decoder that accepts padded and unpadded input.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

const PLAIN_TEXT: &str = "text/plain";

/// Flattens a Gmail message into subject, sender and plain-text body.
pub fn summarize_message(message: &Message) -> EmailSummary {
    let Some(payload) = message.payload.as_ref() else {
        warn!(id = %message.id, "message has no payload");
        return EmailSummary::new(None, None, "");
    };

    let subject = header_value(&payload.headers, "Subject").map(str::to_string);
    let from = header_value(&payload.headers, "From").map(str::to_string);

    EmailSummary::new(subject, from, extract_body(payload))
}

/// Returns the value of the first header named exactly `name`.
pub fn header_value<'a>(headers: &'a [Header], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name == name)
        .map(|h| h.value.as_str())
}

/// Extracts the decoded plain-text body of a payload, or an empty string.
pub fn extract_body(payload: &MessagePart) -> String {
    let data = match payload.parts.as_deref() {
        Some(parts) => parts
            .iter()
            .find(|p| p.mime_type.as_deref() == Some(PLAIN_TEXT))
            .and_then(|p| p.body.as_ref())
            .and_then(|b| b.inline_data()),
        None => payload.body.as_ref().and_then(|b| b.inline_data()),
    };

    data.and_then(decode_body_data).unwrap_or_default()
}

/// Decodes Gmail body data.
///
/// Accepts both the URL-safe and the standard alphabet, with or without
/// padding. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_body_data(data: &str) -> Option<String> {
    let normalized: String = data
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    match BODY_ENGINE.decode(normalized.as_bytes()) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!(error = %e, "failed to decode message body");
            None
        }
    }
}
