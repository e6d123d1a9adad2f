// 📝 Logging - tracing-subscriber fmt output filtered by RUST_LOG or the config level

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Noisy dependencies kept at warn unless RUST_LOG says otherwise.
const QUIET_TARGETS: &[&str] = &["hyper", "h2", "tower"];

/// Filter directives for `level`, before any RUST_LOG override.
pub fn default_directives(level: &str) -> String {
    let mut directives = vec![level.to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|target| format!("{}=warn", target)));
    directives.join(",")
}

/// Install the global subscriber. Call once, at startup.
pub fn init(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(level))
            .with_context(|| format!("Invalid log level {:?}", level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}
