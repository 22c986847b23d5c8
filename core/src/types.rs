//! Request payload types.
//!
//! # Design
//! `FileDescriptor` mirrors what a caller may only partly know about a file:
//! every field is optional, and upload-body construction skips any descriptor
//! that is not complete instead of failing the whole request.

use std::io;
use std::path::Path;

use crate::mime;

/// JSON body parameters. `serde_json::Map` keeps keys sorted.
pub type BodyParams = serde_json::Map<String, serde_json::Value>;

/// One file to upload as a `multipart/form-data` part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDescriptor {
    pub content: Option<Vec<u8>>,
    pub mimetype: Option<String>,
    pub filename: Option<String>,
}

impl FileDescriptor {
    pub fn new(content: impl Into<Vec<u8>>, mimetype: &str, filename: &str) -> Self {
        Self {
            content: Some(content.into()),
            mimetype: Some(mimetype.to_string()),
            filename: Some(filename.to_string()),
        }
    }

    /// Read a file from disk. Without an explicit `mimetype` the type is
    /// guessed from the extension, falling back to `application/octet-stream`.
    pub fn from_path(path: impl AsRef<Path>, mimetype: Option<&str>) -> io::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let mimetype = mimetype
            .or_else(|| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .and_then(mime::for_extension)
            })
            .unwrap_or(mime::APPLICATION_OCTET_STREAM);
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self {
            content: Some(content),
            mimetype: Some(mimetype.to_string()),
            filename,
        })
    }

    /// `(filename, mimetype, content)` when all three are present.
    pub fn parts(&self) -> Option<(&str, &str, &[u8])> {
        match (&self.filename, &self.mimetype, &self.content) {
            (Some(filename), Some(mimetype), Some(content)) => {
                Some((filename.as_str(), mimetype.as_str(), content.as_slice()))
            }
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.parts().is_some()
    }
}
