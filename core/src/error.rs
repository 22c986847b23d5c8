//! Error types for the RestKit client.
//!
//! # Design
//! Failures before any I/O (`MalformedUrl`, `Json`) are kept apart from
//! failures of the exchange itself (`Transport`) and from failures the client
//! synthesizes out of a completed exchange (`Server`, `Decode`). A response
//! that merely lacks a usable content type is not an error; see
//! `ResponseOutcome::content_kind`.

use thiserror::Error;

use crate::decode::ContentKind;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The target URL (after appending query parameters) does not parse.
    /// No request was sent.
    #[error("Wrong URL format: '{url}'")]
    MalformedUrl { url: String },

    /// The underlying HTTP stack failed (DNS, connect, I/O, invalid header).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 200..=299.
    #[error("Server returned HTTP {status}{}", describe_message(.message))]
    Server {
        /// HTTP status code, 0 when unknown.
        status: u16,
        /// Text body of the response, when the server sent one.
        message: Option<String>,
    },

    /// The body did not match its declared content type.
    #[error("Failed to decode {kind} response body: {reason}")]
    Decode { kind: ContentKind, reason: String },

    /// Request body parameters could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_message(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {message}"),
        None => String::new(),
    }
}

impl Error {
    /// HTTP status carried by a `Server` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message extracted from the response body of a `Server` error.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_malformed_url(&self) -> bool {
        matches!(self, Error::MalformedUrl { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a client-side (4xx) rejection.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Server { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server-side (5xx) failure.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Server { status, .. } if *status >= 500)
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
