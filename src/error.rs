// 🚫 Export Errors - One variant per way a request can be refused
// Every pipeline stage returns Result<_, ExportError> and stops at the first failure.

use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// ERROR TAXONOMY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Content-Type must be application/json")]
    BadContentType,

    #[error("Request body cannot be empty")]
    EmptyBody,

    #[error("Invalid JSON format")]
    MalformedJson { details: String },

    #[error("Request body too large")]
    PayloadTooLarge { limit: usize },

    /// Top-level value or one of its fields has the wrong shape.
    #[error("{0}")]
    InvalidShape(&'static str),

    #[error("Invalid movement at index {index}: must be an object")]
    InvalidMovement { index: usize },

    #[error("Missing required field '{field}' in movement at index {index}")]
    MissingField { field: &'static str, index: usize },

    #[error("Internal server error")]
    Internal { details: String },
}

impl ExportError {
    /// Wrap any unexpected failure as a 500.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        let details = cause.to_string();
        ExportError::Internal {
            details: if details.is_empty() {
                "Unknown error".to_string()
            } else {
                details
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ExportError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ExportError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ExportError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ExportError::BadContentType
            | ExportError::EmptyBody
            | ExportError::MalformedJson { .. }
            | ExportError::InvalidShape(_)
            | ExportError::InvalidMovement { .. }
            | ExportError::MissingField { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn details(&self) -> Option<String> {
        match self {
            ExportError::MalformedJson { details } | ExportError::Internal { details } => {
                Some(details.clone())
            }
            ExportError::PayloadTooLarge { limit } => Some(format!("limit is {} bytes", limit)),
            _ => None,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            details: self.details(),
        }
    }
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// JSON body of every error response: `{"error": ..., "details": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(ExportError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ExportError::BadContentType.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ExportError::EmptyBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ExportError::MissingField { field: "date", index: 0 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ExportError::PayloadTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ExportError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages_report_index_and_field() {
        let err = ExportError::MissingField { field: "amount", index: 3 };
        assert_eq!(
            err.to_string(),
            "Missing required field 'amount' in movement at index 3"
        );

        let err = ExportError::InvalidMovement { index: 7 };
        assert_eq!(err.to_string(), "Invalid movement at index 7: must be an object");
    }

    #[test]
    fn test_body_omits_missing_details() {
        let json = serde_json::to_string(&ExportError::EmptyBody.body()).unwrap();
        assert_eq!(json, r#"{"error":"Request body cannot be empty"}"#);

        let json = serde_json::to_string(
            &ExportError::MalformedJson { details: "EOF".to_string() }.body(),
        )
        .unwrap();
        assert_eq!(json, r#"{"error":"Invalid JSON format","details":"EOF"}"#);
    }

    #[test]
    fn test_internal_falls_back_to_unknown_error() {
        assert_eq!(
            ExportError::internal("").details(),
            Some("Unknown error".to_string())
        );
    }
}
