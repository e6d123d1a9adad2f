// 🌍 CORS Headers - Shared, immutable header set attached to every response

use http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use serde::Deserialize;
use thiserror::Error;

/// `[cors]` table of the server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_headers: String,
    pub allow_methods: String,
    pub max_age_secs: u64,
}

const DEFAULT_ALLOW_ORIGIN: &str = "*";
const DEFAULT_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const DEFAULT_ALLOW_METHODS: &str = "POST, OPTIONS";
const DEFAULT_MAX_AGE_SECS: u64 = 86400;

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
            allow_headers: DEFAULT_ALLOW_HEADERS.to_string(),
            allow_methods: DEFAULT_ALLOW_METHODS.to_string(),
            max_age_secs: DEFAULT_MAX_AGE_SECS,
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid CORS header {name}: {source}")]
pub struct CorsHeaderError {
    name: &'static str,
    #[source]
    source: http::header::InvalidHeaderValue,
}

/// Validated CORS headers, built once at startup and shared by both handlers.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    headers: HeaderMap,
}

impl CorsHeaders {
    pub fn from_config(config: &CorsConfig) -> Result<Self, CorsHeaderError> {
        let entries: [(HeaderName, &'static str, String); 4] = [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "allow_origin", config.allow_origin.clone()),
            (ACCESS_CONTROL_ALLOW_HEADERS, "allow_headers", config.allow_headers.clone()),
            (ACCESS_CONTROL_ALLOW_METHODS, "allow_methods", config.allow_methods.clone()),
            (ACCESS_CONTROL_MAX_AGE, "max_age_secs", config.max_age_secs.to_string()),
        ];

        let mut headers = HeaderMap::with_capacity(entries.len());
        for (header, name, value) in entries {
            let value = HeaderValue::from_str(&value)
                .map_err(|source| CorsHeaderError { name, source })?;
            headers.insert(header, value);
        }

        Ok(Self { headers })
    }

    /// Fresh copy of the header set, ready to be extended by a response builder.
    pub fn to_header_map(&self) -> HeaderMap {
        self.headers.clone()
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl Default for CorsHeaders {
    fn default() -> Self {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(DEFAULT_ALLOW_ORIGIN));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(DEFAULT_ALLOW_HEADERS));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(DEFAULT_ALLOW_METHODS));
        headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from(DEFAULT_MAX_AGE_SECS));
        Self { headers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers() {
        let cors = CorsHeaders::default();
        let headers = cors.to_header_map();

        assert_eq!(cors.len(), 4);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_HEADERS],
            "authorization, x-client-info, apikey, content-type"
        );
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[test]
    fn test_default_matches_default_config() {
        let from_config = CorsHeaders::from_config(&CorsConfig::default()).unwrap();
        assert_eq!(from_config.to_header_map(), CorsHeaders::default().to_header_map());
    }

    #[test]
    fn test_custom_origin() {
        let config = CorsConfig {
            allow_origin: "https://finanzapp.example".to_string(),
            max_age_secs: 600,
            ..CorsConfig::default()
        };
        let headers = CorsHeaders::from_config(&config).unwrap().to_header_map();

        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "https://finanzapp.example");
        assert_eq!(headers[ACCESS_CONTROL_MAX_AGE], "600");
    }

    #[test]
    fn test_rejects_control_characters() {
        let config = CorsConfig {
            allow_origin: "*\r\nX-Evil: 1".to_string(),
            ..CorsConfig::default()
        };
        let err = CorsHeaders::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("allow_origin"));
    }
}
