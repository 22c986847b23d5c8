//! Request body encoders: JSON objects and `multipart/form-data`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::error::Result;
use crate::types::{BodyParams, FileDescriptor};

const BOUNDARY_PREFIX: &str = "------------------------------------------------------boundary";

/// 2001-01-01T00:00:00Z as seconds since the Unix epoch.
const REFERENCE_EPOCH_SECS: u64 = 978_307_200;

/// Serialize body parameters to a pretty-printed JSON object.
pub fn encode_json(params: &BodyParams) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(params)?)
}

/// A fully encoded multipart body and the boundary that delimits it.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub boundary: String,
    pub bytes: Vec<u8>,
}

impl MultipartBody {
    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Boundary token: fixed prefix plus whole seconds elapsed since
/// 2001-01-01 UTC. Unique enough for one request; not random.
pub fn boundary_at(now: SystemTime) -> String {
    let since_unix = now.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
    let secs = since_unix.as_secs().saturating_sub(REFERENCE_EPOCH_SECS);
    format!("{BOUNDARY_PREFIX}{secs}")
}

pub fn boundary() -> String {
    boundary_at(SystemTime::now())
}

/// Encode `params` and every complete file in `files` as multipart parts.
///
/// Incomplete descriptors are skipped. The body always ends with the closing
/// delimiter, even when no part was written.
pub fn encode_multipart(
    boundary: &str,
    params: Option<&BodyParams>,
    files: &[FileDescriptor],
) -> MultipartBody {
    let mut bytes = Vec::new();

    for (key, value) in params.into_iter().flatten() {
        bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        bytes.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{key}\"\r\n\r\n").as_bytes(),
        );
        bytes.extend_from_slice(field_text(value).as_bytes());
        bytes.extend_from_slice(b"\r\n");
    }

    for (filename, mimetype, content) in files.iter().filter_map(FileDescriptor::parts) {
        bytes.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{filename}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        bytes.extend_from_slice(format!("Content-Type: {mimetype}\r\n\r\n").as_bytes());
        bytes.extend_from_slice(content);
        bytes.extend_from_slice(b"\r\n");
    }

    bytes.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    MultipartBody {
        boundary: boundary.to_string(),
        bytes,
    }
}

/// Strings go out raw; everything else as compact JSON.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
