// FinanzApp Export - Core Library
// Validated export pipeline for the backup and household downloads, plus the HTTP adapter

pub mod config;
pub mod cors;
pub mod download;
pub mod error;
pub mod filename;
pub mod logging;
pub mod pipeline;
pub mod request;
pub mod schema;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use cors::{CorsConfig, CorsHeaders};
pub use download::{build_download, error_response, preflight_response, DownloadResponse};
pub use error::{ErrorBody, ExportError};
pub use filename::{backup_filename, household_filename, Clock, FixedClock, SystemClock};
pub use pipeline::{ExportService, ExportVariant};
pub use request::{guard, parse_body, ExportRequest, RequestHead};
pub use schema::{
    validate_backup, validate_household, BackupPayload, HouseholdExport,
    REQUIRED_MOVEMENT_FIELDS,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
