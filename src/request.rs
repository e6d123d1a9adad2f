// 📨 Request Guard - Method, Content-Type and body checks shared by both exports

use crate::error::ExportError;
use http::header::{HeaderMap, CONTENT_TYPE};
use http::Method;
use serde_json::Value;

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// What the guard needs to know before the body is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: Method,
    pub content_type: Option<String>,
}

impl RequestHead {
    pub fn new(method: Method, content_type: Option<&str>) -> Self {
        Self {
            method,
            content_type: content_type.map(str::to_string),
        }
    }

    /// Build from a method and raw headers. A non-text Content-Type counts as missing.
    pub fn from_headers(method: Method, headers: &HeaderMap) -> Self {
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        Self { method, content_type }
    }

    pub fn is_preflight(&self) -> bool {
        self.method == Method::OPTIONS
    }
}

/// Incoming request with its body fully buffered.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub head: RequestHead,
    pub body: Vec<u8>,
}

impl ExportRequest {
    pub fn new(method: Method, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            head: RequestHead::new(method, content_type),
            body: body.into(),
        }
    }

    /// POST with `Content-Type: application/json`.
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Method::POST, Some("application/json"), body)
    }
}

// ============================================================================
// GUARD
// ============================================================================

/// Reject anything that is not a JSON-typed POST.
///
/// The Content-Type only has to mention `application/json`, so parameters such
/// as `; charset=utf-8` are accepted. Media types match case-insensitively.
pub fn guard(head: &RequestHead) -> Result<(), ExportError> {
    if head.method != Method::POST {
        return Err(ExportError::MethodNotAllowed);
    }

    match head.content_type.as_deref() {
        Some(content_type) if content_type.to_ascii_lowercase().contains("application/json") => {
            Ok(())
        }
        _ => Err(ExportError::BadContentType),
    }
}

// ============================================================================
// BODY READER & PARSER
// ============================================================================

/// Decode the buffered body as text and parse it as JSON.
///
/// A leading byte order mark is dropped. A blank body is reported as
/// `EmptyBody`, never as a parse failure.
pub fn parse_body(body: &[u8]) -> Result<Value, ExportError> {
    let decoded = String::from_utf8_lossy(body);
    let text = decoded.strip_prefix('\u{FEFF}').unwrap_or(&*decoded);
    if text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}').is_empty() {
        return Err(ExportError::EmptyBody);
    }

    serde_json::from_str(text).map_err(|e| {
        let details = e.to_string();
        ExportError::MalformedJson {
            details: if details.is_empty() {
                "Unknown parsing error".to_string()
            } else {
                details
            },
        }
    })
}
