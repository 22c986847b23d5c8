//! MIME types commonly attached to uploaded files.

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const TEXT_CSS: &str = "text/css";
pub const TEXT_CSV: &str = "text/csv";
pub const IMAGE_JPEG: &str = "image/jpeg";
pub const IMAGE_PNG: &str = "image/png";
pub const IMAGE_GIF: &str = "image/gif";
pub const AUDIO_WAV: &str = "audio/wav";
pub const AUDIO_OGG: &str = "audio/ogg";
pub const VIDEO_OGG: &str = "video/ogg";
pub const VIDEO_MPEG: &str = "video/mpeg";
pub const APPLICATION_OGG: &str = "application/ogg";
pub const APPLICATION_PDF: &str = "application/pdf";
pub const APPLICATION_RTF: &str = "application/rtf";
pub const APPLICATION_ZIP: &str = "application/zip";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";
pub const APPLICATION_XML: &str = "application/xml";

/// Guess a MIME type from a file extension (case-insensitive, no dot).
pub fn for_extension(extension: &str) -> Option<&'static str> {
    let mime = match extension.to_ascii_lowercase().as_str() {
        "txt" => TEXT_PLAIN,
        "html" | "htm" => TEXT_HTML,
        "css" => TEXT_CSS,
        "csv" => TEXT_CSV,
        "jpg" | "jpeg" => IMAGE_JPEG,
        "png" => IMAGE_PNG,
        "gif" => IMAGE_GIF,
        "wav" => AUDIO_WAV,
        "oga" => AUDIO_OGG,
        "ogv" => VIDEO_OGG,
        "mpeg" | "mpg" => VIDEO_MPEG,
        "ogg" | "ogx" => APPLICATION_OGG,
        "pdf" => APPLICATION_PDF,
        "rtf" => APPLICATION_RTF,
        "zip" => APPLICATION_ZIP,
        "json" => APPLICATION_JSON,
        "js" => APPLICATION_JAVASCRIPT,
        "xml" => APPLICATION_XML,
        "bin" => APPLICATION_OCTET_STREAM,
        _ => return None,
    };
    Some(mime)
}
