use std::fmt;

use url::Url;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
/// Text currently typed into the message field.
///
/// Invariant: at most [`DraftMessage::MAX_CHARS`] characters. No other validation
/// is applied; whitespace is kept verbatim until the draft is turned into a
/// [`MessageBody`].
pub struct DraftMessage(String);

impl DraftMessage {
    /// Input cap of the message field.
    pub const MAX_CHARS: usize = 200;

    /// Create a draft, keeping at most the first [`DraftMessage::MAX_CHARS`] characters.
    pub fn new(value: impl Into<String>) -> Self {
        let mut value = value.into();
        truncate_chars(&mut value, Self::MAX_CHARS);
        Self(value)
    }

    /// Borrow the draft text as typed.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of characters in the draft.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Reset the draft to the empty string.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message text as transmitted (`message_body`).
///
/// Invariant: trimmed, non-empty, at most [`MessageBody::MAX_CHARS`] characters.
pub struct MessageBody {
    text: String,
    truncated: bool,
}

impl MessageBody {
    /// JSON field name used by the relay (`message_body`).
    pub const FIELD: &'static str = "message_body";

    /// Longest body the relay accepts; longer input is cut client-side.
    pub const MAX_CHARS: usize = 160;

    /// Trim `value`, reject it if nothing is left, and cut it to
    /// [`MessageBody::MAX_CHARS`] characters.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let mut text = trimmed.to_owned();
        let truncated = truncate_chars(&mut text, Self::MAX_CHARS);
        Ok(Self { text, truncated })
    }

    /// Build the body to send for `draft`.
    pub fn from_draft(draft: &DraftMessage) -> Result<Self, ValidationError> {
        Self::new(draft.as_str())
    }

    /// Borrow the text that goes on the wire.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether characters past [`MessageBody::MAX_CHARS`] were dropped.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Base URL of the relay API.
///
/// Invariant: an absolute `http` or `https` URL with a host. Trailing slashes are
/// dropped so endpoint paths can be appended directly.
pub struct ApiBase {
    raw: String,
    url: Url,
}

impl ApiBase {
    /// Path of the only endpoint this crate talks to.
    pub const SEND_PING_PATH: &'static str = "/send-ping";

    /// Parse and validate a base URL such as `http://192.168.1.200:5001`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let raw = input.trim().trim_end_matches('/').to_owned();
        let invalid = |reason: String| ValidationError::InvalidApiBase {
            input: input.to_owned(),
            reason,
        };

        let url = Url::parse(&raw).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_owned()));
        }

        Ok(Self { raw, url })
    }

    /// The base as configured, without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Full URL of `POST /send-ping`.
    pub fn send_ping_url(&self) -> String {
        format!("{}{}", self.raw, Self::SEND_PING_PATH)
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Cut `value` to its first `max` characters. Returns `true` if anything was removed.
fn truncate_chars(value: &mut String, max: usize) -> bool {
    match value.char_indices().nth(max) {
        Some((idx, _)) => {
            value.truncate(idx);
            true
        }
        None => false,
    }
}
