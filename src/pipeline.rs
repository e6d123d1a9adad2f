// 🔁 Export Pipeline - Preflight → Guard → Read/Parse → Validate → Build Response
// Stateless per request; the first failing stage decides the response.

use crate::cors::CorsHeaders;
use crate::download::{build_download, error_response, preflight_response, DownloadResponse};
use crate::error::ExportError;
use crate::filename::{backup_filename, household_filename, Clock, SystemClock};
use crate::request::{guard, parse_body, ExportRequest, RequestHead};
use crate::schema::{validate_backup, validate_household};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// VARIANTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportVariant {
    /// Full application backup (`export_backup`)
    Backup,
    /// Monthly household movements (`export_hogar`)
    Household,
}

impl ExportVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ExportVariant::Backup => "export_backup",
            ExportVariant::Household => "export_hogar",
        }
    }
}

impl fmt::Display for ExportVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SERVICE
// ============================================================================

/// Both export handlers, sharing one immutable CORS header set.
#[derive(Clone)]
pub struct ExportService {
    cors: CorsHeaders,
    clock: Arc<dyn Clock>,
}

impl ExportService {
    pub fn new(cors: CorsHeaders) -> Self {
        Self::with_clock(cors, Arc::new(SystemClock))
    }

    pub fn with_clock(cors: CorsHeaders, clock: Arc<dyn Clock>) -> Self {
        Self { cors, clock }
    }

    pub fn cors(&self) -> &CorsHeaders {
        &self.cors
    }

    /// Answer everything that can be decided from the request head alone.
    ///
    /// Returns `Some` for a preflight or a guard rejection; `None` means the
    /// body should be read and passed to [`ExportService::respond`].
    pub fn precheck(&self, head: &RequestHead) -> Option<DownloadResponse> {
        if head.is_preflight() {
            return Some(preflight_response(&self.cors));
        }

        guard(head).err().map(|e| self.reject(&e))
    }

    /// Parse, validate and package a buffered body. Never fails: every error
    /// becomes its JSON error response here.
    pub fn respond(&self, variant: ExportVariant, body: &[u8]) -> DownloadResponse {
        match self.export(variant, body) {
            Ok(response) => {
                tracing::info!(
                    variant = %variant,
                    filename = response.filename().unwrap_or_default(),
                    bytes = response.body.len(),
                    "export ready"
                );
                response
            }
            Err(e) => self.reject(&e),
        }
    }

    /// Full pipeline over an already buffered request.
    pub fn handle(&self, variant: ExportVariant, request: &ExportRequest) -> DownloadResponse {
        self.precheck(&request.head)
            .unwrap_or_else(|| self.respond(variant, &request.body))
    }

    /// Error response for a failure raised outside the pipeline (body read, panic).
    pub fn reject(&self, error: &ExportError) -> DownloadResponse {
        if error.status().is_server_error() {
            tracing::error!(error = %error, details = ?error.details(), "export failed");
        } else {
            tracing::warn!(error = %error, status = error.status().as_u16(), "export rejected");
        }
        error_response(&self.cors, error)
    }

    fn export(&self, variant: ExportVariant, body: &[u8]) -> Result<DownloadResponse, ExportError> {
        let value = parse_body(body)?;

        match variant {
            ExportVariant::Backup => {
                let payload = validate_backup(value)?;
                let filename = backup_filename(self.clock.now());
                build_download(&self.cors, &filename, &payload)
            }
            ExportVariant::Household => {
                let export = validate_household(value)?;
                let filename = household_filename(&export.mes);
                build_download(&self.cors, &filename, &export.movimientos)
            }
        }
    }
}

impl fmt::Debug for ExportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportService")
            .field("cors", &self.cors)
            .finish_non_exhaustive()
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new(CorsHeaders::default())
    }
}
