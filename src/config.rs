// ⚙️ Server Configuration - TOML file + environment overrides

use crate::cors::CorsConfig;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Path of the TOML config file; defaults are used when unset.
pub const CONFIG_PATH_ENV: &str = "FINANZAS_EXPORT_CONFIG";
/// Overrides `bind_addr`.
pub const BIND_ADDR_ENV: &str = "FINANZAS_EXPORT_BIND";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_addr: String,
    /// Default tracing filter; `RUST_LOG` wins when set
    pub log_level: String,
    /// Path both export routes are mounted under
    pub route_prefix: String,
    /// Largest request body that will be buffered
    pub max_body_bytes: usize,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            route_prefix: "/functions/v1".to_string(),
            max_body_bytes: 10 * 1024 * 1024,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load from `FINANZAS_EXPORT_CONFIG` (if set), then apply env overrides.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_toml_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Ok(addr) = std::env::var(BIND_ADDR_ENV) {
            config.bind_addr = addr;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_body_bytes == 0 {
            bail!("max_body_bytes must be greater than 0");
        }
        if !self.route_prefix.is_empty() && !self.route_prefix.starts_with('/') {
            bail!("route_prefix must start with '/', got {:?}", self.route_prefix);
        }
        if self.route_prefix.ends_with('/') {
            bail!("route_prefix must not end with '/', got {:?}", self.route_prefix);
        }
        Ok(())
    }

    /// Full path of an export route, e.g. `/functions/v1/export_hogar`.
    pub fn route(&self, name: &str) -> String {
        format!("{}/{}", self.route_prefix, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.route("export_backup"), "/functions/v1/export_backup");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            bind_addr = "127.0.0.1:8080"

            [cors]
            allow_origin = "https://finanzapp.example"
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors.allow_origin, "https://finanzapp.example");
        assert_eq!(config.cors.allow_methods, "POST, OPTIONS");
    }

    #[test]
    fn test_empty_prefix_mounts_at_root() {
        let config = ServerConfig::from_toml_str(r#"route_prefix = """#).unwrap();
        assert_eq!(config.route("export_hogar"), "/export_hogar");
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(ServerConfig::from_toml_str("bind = \"0.0.0.0:1\"").is_err());
        assert!(ServerConfig::from_toml_str("[cors]\norigin = \"*\"").is_err());
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(ServerConfig::from_toml_str("max_body_bytes = 0").is_err());
        assert!(ServerConfig::from_toml_str("route_prefix = \"functions\"").is_err());
        assert!(ServerConfig::from_toml_str("route_prefix = \"/functions/\"").is_err());
    }

    #[test]
    fn test_example_file_is_valid() {
        let config = ServerConfig::from_toml_str(include_str!("../config.example.toml")).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = ServerConfig::from_toml_file(Path::new("/nonexistent/finanzas.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/finanzas.toml"));
    }
}
