//! Caller-owned state for a sequence of requests.
//!
//! # Design
//! `RestClient` itself is stateless. Headers that should persist between
//! requests, and the metadata of the last completed exchange, live in a
//! `RequestContext` that the caller passes by `&mut` into every call. One
//! context therefore serves one request at a time; callers that need
//! parallel requests give each task its own context.

use url::Url;

use crate::decode::ContentKind;
use crate::headers::RequestHeaders;

/// Metadata of the most recent exchange made with a `RequestContext`.
///
/// Cleared when a request is built and filled in when its response is
/// interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseOutcome {
    /// Final URL the request was sent to, query included.
    pub url: Option<Url>,
    /// `None` if no response arrived.
    pub status: Option<u16>,
    /// Response headers as received.
    pub headers: Vec<(String, String)>,
    /// `None` if the response had no `Content-Type` header.
    pub content_kind: Option<ContentKind>,
}

impl ResponseOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(200..=299))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub headers: RequestHeaders,
    pub outcome: ResponseOutcome,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers(headers: RequestHeaders) -> Self {
        Self {
            headers,
            outcome: ResponseOutcome::default(),
        }
    }

    /// See `RequestHeaders::add`.
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.add(name, value);
    }

    pub(crate) fn begin(&mut self, url: Option<Url>) {
        self.outcome = ResponseOutcome {
            url,
            ..ResponseOutcome::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::AUTHORIZATION;

    #[test]
    fn headers_persist_across_begin() {
        let mut ctx = RequestContext::new();
        ctx.add_header(AUTHORIZATION, "token");
        ctx.outcome.status = Some(500);

        ctx.begin(Url::parse("http://localhost:3000/").ok());

        assert_eq!(ctx.headers.get(AUTHORIZATION), Some("Bearer token"));
        assert_eq!(ctx.outcome.status, None);
        assert_eq!(ctx.outcome.url.as_ref().map(Url::as_str), Some("http://localhost:3000/"));
    }

    #[test]
    fn success_range() {
        let mut outcome = ResponseOutcome::default();
        assert!(!outcome.is_success());
        outcome.status = Some(201);
        assert!(outcome.is_success());
        outcome.status = Some(300);
        assert!(!outcome.is_success());
    }
}
