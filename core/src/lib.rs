//! Small async HTTP client for JSON and file-upload endpoints.
//!
//! # Overview
//! Builds URLs with percent-encoded query parameters, encodes JSON and
//! `multipart/form-data` bodies, sends one request per call with reqwest,
//! and decodes the response according to its `Content-Type`.
//!
//! # Design
//! - `RestClient` is stateless; persistent headers and the outcome of the
//!   last exchange live in a caller-owned `RequestContext`.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_response` (consumes an `HttpResponse`), so the I/O boundary is
//!   explicit and both halves are testable without a network.
//! - Responses are classified as text, JSON or unrecognized. Unrecognized
//!   and missing content types produce an empty success; the classification
//!   is recorded in `ResponseOutcome::content_kind`.
//! - Statuses outside 200..=299 become `Error::Server`. Nothing is retried.

pub mod body;
pub mod client;
pub mod context;
pub mod decode;
pub mod error;
pub mod headers;
pub mod http;
pub mod mime;
pub mod query;
pub mod types;

mod transport;

pub use client::{ClientBuilder, RestClient};
pub use context::{RequestContext, ResponseOutcome};
pub use decode::{ContentKind, Payload};
pub use error::{Error, Result};
pub use headers::RequestHeaders;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::QueryParams;
pub use types::{BodyParams, FileDescriptor};
