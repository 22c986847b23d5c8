//! Request building, execution and response interpretation.
//!
//! # Design
//! `RestClient` holds only a reqwest connection handle and carries no state
//! between calls. Every operation is split in two pure halves around the
//! network: `build_request` / `build_upload` produce an `HttpRequest`, and
//! `parse_response` consumes an `HttpResponse`. `make_request` and
//! `upload_files` glue the halves together with one reqwest round-trip.
//! Per-request state is recorded in the caller's `RequestContext`.

use tracing::{debug, warn};

use crate::body::{self, MultipartBody};
use crate::context::RequestContext;
use crate::decode::{self, ContentKind, Payload};
use crate::error::{Error, Result};
use crate::headers::{APPLICATION_JSON, CONTENT_TYPE};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{self, QueryParams};
use crate::transport;
use crate::types::{BodyParams, FileDescriptor};

/// Async HTTP client with JSON and multipart helpers.
///
/// # Example
///
/// ```no_run
/// use restkit_core::{HttpMethod, QueryParams, RequestContext, RestClient};
///
/// # async fn example() -> restkit_core::Result<()> {
/// let client = RestClient::new()?;
/// let mut ctx = RequestContext::new();
///
/// let mut query = QueryParams::new();
/// query.insert("a".to_string(), "5".to_string());
/// query.insert("b".to_string(), "10".to_string());
///
/// let result = client
///     .make_request(
///         &mut ctx,
///         "http://localhost:3000/testapi/getwithqueryparams",
///         HttpMethod::Get,
///         Some(&query),
///         None,
///     )
///     .await?;
/// println!("{:?} -> {result:?}", ctx.outcome.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
}

impl RestClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Wrap an existing reqwest client.
    pub fn from_http(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a request with an optional JSON body.
    ///
    /// Adds `Content-Type: application/json` to this request when a body is
    /// given and the context has no `Content-Type` of its own.
    pub fn build_request(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        method: HttpMethod,
        query: Option<&QueryParams>,
        body: Option<&BodyParams>,
    ) -> Result<HttpRequest> {
        let url = target_url(ctx, url, query)?;

        let mut headers = ctx.headers.to_pairs();
        let body = match body {
            Some(params) => {
                if !ctx.headers.contains(CONTENT_TYPE) {
                    headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));
                }
                Some(body::encode_json(params)?)
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Build a `multipart/form-data` upload request.
    ///
    /// The request's `Content-Type` always carries the generated boundary,
    /// whatever the context says. Incomplete file descriptors are dropped.
    pub fn build_upload(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        method: HttpMethod,
        query: Option<&QueryParams>,
        body: Option<&BodyParams>,
        files: &[FileDescriptor],
    ) -> Result<HttpRequest> {
        let url = target_url(ctx, url, query)?;

        let skipped = files.iter().filter(|file| !file.is_complete()).count();
        if skipped > 0 {
            debug!(skipped, "skipping incomplete file descriptors");
        }

        let MultipartBody { boundary, bytes } =
            body::encode_multipart(&body::boundary(), body, files);

        let mut headers = ctx.headers.clone();
        headers.set_raw(CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"));

        Ok(HttpRequest {
            method,
            url,
            headers: headers.to_pairs(),
            body: Some(bytes),
        })
    }

    /// Record `response` in `ctx` and interpret it.
    ///
    /// A 2xx status yields the decoded body, which may be `None` (no body,
    /// no `Content-Type`, or an unrecognized type). Any other status yields
    /// `Error::Server`, with the body as message when it decoded to text.
    pub fn parse_response(
        &self,
        ctx: &mut RequestContext,
        response: HttpResponse,
    ) -> Result<Option<Payload>> {
        let content_kind = response.header(CONTENT_TYPE).map(ContentKind::classify);

        let decoded = match (&content_kind, response.body.as_deref()) {
            (_, None) => {
                debug!(status = response.status, "response has no body");
                Ok(None)
            }
            (None, Some(_)) => {
                warn!(
                    status = response.status,
                    "no Content-Type header on response, body not decoded"
                );
                Ok(None)
            }
            (Some(kind), Some(bytes)) => {
                if let ContentKind::Unrecognized(mime) = kind {
                    warn!(status = response.status, %mime, "unrecognized content type, body not decoded");
                }
                decode::decode(kind, bytes)
            }
        };

        ctx.outcome.status = Some(response.status);
        ctx.outcome.headers = response.headers;
        ctx.outcome.content_kind = content_kind;

        interpret_status(response.status, decoded)
    }

    /// Send one request and interpret its response.
    pub async fn make_request(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        method: HttpMethod,
        query: Option<&QueryParams>,
        body: Option<&BodyParams>,
    ) -> Result<Option<Payload>> {
        let request = self.build_request(ctx, url, method, query, body)?;
        self.send(ctx, request).await
    }

    /// Upload `files` (and optional form fields) as one multipart request.
    pub async fn upload_files(
        &self,
        ctx: &mut RequestContext,
        url: &str,
        method: HttpMethod,
        query: Option<&QueryParams>,
        body: Option<&BodyParams>,
        files: &[FileDescriptor],
    ) -> Result<Option<Payload>> {
        let request = self.build_upload(ctx, url, method, query, body, files)?;
        self.send(ctx, request).await
    }

    async fn send(&self, ctx: &mut RequestContext, request: HttpRequest) -> Result<Option<Payload>> {
        let pending = transport::execute(&self.http, request).await?;
        // The head is known even if the body read below fails.
        ctx.outcome.status = Some(pending.status);
        ctx.outcome.headers = pending.headers.clone();
        let response = pending.collect().await?;
        self.parse_response(ctx, response)
    }
}

/// Reset `ctx` for a new exchange and resolve the final URL.
fn target_url(
    ctx: &mut RequestContext,
    url: &str,
    query: Option<&QueryParams>,
) -> Result<url::Url> {
    ctx.begin(None);
    let target = match query {
        Some(params) => query::build_url(url, params),
        None => query::build_url(url, &QueryParams::new()),
    }?;
    ctx.outcome.url = Some(target.clone());
    Ok(target)
}

fn interpret_status(status: u16, decoded: Result<Option<Payload>>) -> Result<Option<Payload>> {
    if (200..=299).contains(&status) {
        return decoded;
    }
    let message = match decoded {
        Ok(Some(Payload::Text(text))) => Some(text),
        _ => None,
    };
    Err(Error::Server { status, message })
}

/// Builder for `RestClient`.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<RestClient> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("restkit/{}", env!("CARGO_PKG_VERSION")));
        if user_agent.trim().is_empty() {
            return Err(Error::Config("user agent must not be empty".to_string()));
        }
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(RestClient { http })
    }
}
