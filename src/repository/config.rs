//! Client Configuration
//!
//! A small JSON config file next to the app data, read once at startup.
//! Missing or unreadable config falls back to defaults pointing at a
//! local backend.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

fn default_base_url() -> String {
    "http://127.0.0.1:51731/api".to_string()
}

fn default_page_size() -> usize {
    20
}

fn default_toast_duration_ms() -> u64 {
    3000
}

/// Connection and behavior settings for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the persistence API, including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeline page size (server caps at 100)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// How long a toast stays visible before auto-dismissing
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            toast_duration_ms: default_toast_duration_ms(),
        }
    }
}

/// Read config from disk; `None` when the file is missing or malformed.
pub fn load_config(path: &Path) -> Option<ApiConfig> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("ignoring malformed config at {}: {}", path.display(), e);
            None
        }
    }
}

/// Write config to disk as pretty JSON.
pub fn save_config(path: &Path, config: &ApiConfig) -> DomainResult<()> {
    let raw = serde_json::to_string_pretty(config)
        .map_err(|e| DomainError::Internal(e.to_string()))?;
    std::fs::write(path, raw).map_err(|e| DomainError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.page_size, 20);
        assert!(config.base_url.ends_with("/api"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: ApiConfig =
            serde_json::from_str(r#"{ "base_url": "http://example.test/api" }"#).unwrap();
        assert_eq!(config.base_url, "http://example.test/api");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.toast_duration_ms, 3000);
    }

    #[test]
    fn test_round_trip_on_disk() {
        let dir = std::env::temp_dir().join("lifeflow-client-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");

        let config = ApiConfig {
            base_url: "http://localhost:9999/api".to_string(),
            page_size: 50,
            toast_duration_ms: 1500,
        };
        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.base_url, config.base_url);
        assert_eq!(loaded.page_size, 50);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_none() {
        assert!(load_config(Path::new("/nonexistent/config.json")).is_none());
    }
}
