// 📦 Download Response Builder - Attachment headers that make mobile WebKit save the file
//
// iOS Safari blocks downloads started from the DOM, so the file has to come
// back from the server as a real attachment: Content-Disposition forces the
// save sheet, the cache headers keep every export fresh, and the hardening
// headers stop the body from being sniffed or opened inline.

use crate::cors::CorsHeaders;
use crate::error::ExportError;
use http::header::{
    HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_LENGTH,
    CONTENT_TYPE, EXPIRES, PRAGMA, X_CONTENT_TYPE_OPTIONS,
};
use http::StatusCode;
use serde::Serialize;

const X_DOWNLOAD_OPTIONS: HeaderName = HeaderName::from_static("x-download-options");
const X_PERMITTED_CROSS_DOMAIN_POLICIES: HeaderName =
    HeaderName::from_static("x-permitted-cross-domain-policies");

/// Outgoing response, built once and handed to the transport unchanged.
#[derive(Debug, Clone)]
pub struct DownloadResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    /// Name the body is offered under; `None` for error and preflight responses.
    pub filename: Option<String>,
}

impl DownloadResponse {
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Serialize `payload` as 2-space indented JSON and wrap it as an attachment.
///
/// Content-Length is taken from the same byte buffer that becomes the body.
pub fn build_download<T: Serialize + ?Sized>(
    cors: &CorsHeaders,
    filename: &str,
    payload: &T,
) -> Result<DownloadResponse, ExportError> {
    let body = serde_json::to_vec_pretty(payload).map_err(ExportError::internal)?;

    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| ExportError::internal(format!("invalid Content-Disposition: {}", e)))?;

    let mut headers = cors.to_header_map();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_DISPOSITION, disposition);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_DOWNLOAD_OPTIONS, HeaderValue::from_static("noopen"));
    headers.insert(X_PERMITTED_CROSS_DOMAIN_POLICIES, HeaderValue::from_static("none"));

    Ok(DownloadResponse {
        status: StatusCode::OK,
        headers,
        body,
        filename: Some(filename.to_string()),
    })
}

/// Compact `{error, details}` JSON with CORS headers.
pub fn error_response(cors: &CorsHeaders, error: &ExportError) -> DownloadResponse {
    let body = serde_json::to_vec(&error.body())
        .unwrap_or_else(|_| br#"{"error":"Internal server error"}"#.to_vec());

    let mut headers = cors.to_header_map();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    DownloadResponse {
        status: error.status(),
        headers,
        body,
        filename: None,
    }
}

/// 200 with the CORS headers and nothing else.
pub fn preflight_response(cors: &CorsHeaders) -> DownloadResponse {
    DownloadResponse {
        status: StatusCode::OK,
        headers: cors.to_header_map(),
        body: b"ok".to_vec(),
        filename: None,
    }
}
