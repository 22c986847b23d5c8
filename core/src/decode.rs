//! Response body classification and decoding.
//!
//! # Design
//! Classification is decided by the `Content-Type` header alone:
//! `text/*` bodies become strings, anything mentioning `application/json`
//! becomes a JSON value, and every other type is kept as `Unrecognized`
//! (with the header value) so callers can tell "no body" apart from
//! "a body we did not know how to read".

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

/// How a response body was (or would have been) interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    /// `text/*`
    Text,
    /// `application/json`
    Json,
    /// Any other declared type, verbatim.
    Unrecognized(String),
}

impl ContentKind {
    pub fn classify(content_type: &str) -> Self {
        let normalized = content_type.trim().to_ascii_lowercase();
        if normalized.starts_with("text/") {
            ContentKind::Text
        } else if normalized.contains("application/json") {
            ContentKind::Json
        } else {
            ContentKind::Unrecognized(content_type.to_string())
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Text => f.write_str("text"),
            ContentKind::Json => f.write_str("JSON"),
            ContentKind::Unrecognized(mime) => write!(f, "unrecognized ({mime})"),
        }
    }
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Text(String),
    Json(Value),
}

impl Payload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }
}

/// Decode `body` according to `kind`.
///
/// Returns `Ok(None)` for `Unrecognized`. Newlines are stripped from text.
pub fn decode(kind: &ContentKind, body: &[u8]) -> Result<Option<Payload>> {
    match kind {
        ContentKind::Text => {
            let text = std::str::from_utf8(body).map_err(|e| Error::Decode {
                kind: kind.clone(),
                reason: e.to_string(),
            })?;
            Ok(Some(Payload::Text(text.replace('\n', ""))))
        }
        ContentKind::Json => {
            let value = serde_json::from_slice(body).map_err(|e| Error::Decode {
                kind: kind.clone(),
                reason: e.to_string(),
            })?;
            Ok(Some(Payload::Json(value)))
        }
        ContentKind::Unrecognized(_) => Ok(None),
    }
}
