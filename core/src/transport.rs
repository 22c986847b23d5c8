//! Executes `HttpRequest` values over the network with reqwest.

use tracing::{debug, warn};

use crate::error::Result;
use crate::http::{HttpRequest, HttpResponse};

/// A response whose status line and headers have arrived but whose body
/// has not been read yet.
pub(crate) struct PendingResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    inner: reqwest::Response,
}

impl PendingResponse {
    /// Read the body to the end.
    pub async fn collect(self) -> Result<HttpResponse> {
        let Self {
            status,
            headers,
            inner,
        } = self;
        let bytes = inner.bytes().await.inspect_err(|e| {
            warn!(status, error = %e, "reading response body failed");
        })?;
        let body = (!bytes.is_empty()).then(|| bytes.to_vec());

        debug!(status, bytes = bytes.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Send `request` and wait for the response head.
///
/// Any status is returned as data; only transport failures are errors.
pub(crate) async fn execute(http: &reqwest::Client, request: HttpRequest) -> Result<PendingResponse> {
    debug!(method = %request.method, url = %request.url, "sending request");

    let mut builder = http.request(request.method.into(), request.url.clone());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder.send().await.inspect_err(|e| {
        warn!(url = %request.url, error = %e, "request failed");
    })?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    Ok(PendingResponse {
        status,
        headers,
        inner: response,
    })
}
