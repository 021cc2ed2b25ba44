use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::config::load_config;

/// Complete web server configuration loaded from TOML.
///
/// Every field has a default, so an empty file (or no file at all) gives a
/// working server on `127.0.0.1:5000`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerInfo,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInfo {
    /// Listen address, e.g. "127.0.0.1:5000"
    pub address: String,
    /// Request body limit for multipart uploads
    pub max_upload_bytes: usize,
    /// Static frontend bundle served at `/` when set
    pub frontend_dir: Option<PathBuf>,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:5000".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
            frontend_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Staging directory for uploaded and encoded images
    pub directory: PathBuf,
    /// Accepted file extensions, compared case-insensitively
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uploads"),
            allowed_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_config(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.server.address, "127.0.0.1:5000");
        assert_eq!(config.uploads.directory, PathBuf::from("uploads"));
        assert_eq!(config.uploads.allowed_extensions, vec!["png", "jpg", "jpeg"]);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            address = "0.0.0.0:8080"

            [uploads]
            allowed_extensions = ["png"]
            "#,
        )
        .unwrap();

        assert_eq!(config.server.address, "0.0.0.0:8080");
        assert_eq!(config.server.max_upload_bytes, 16 * 1024 * 1024);
        assert!(config.server.frontend_dir.is_none());
        assert_eq!(config.uploads.directory, PathBuf::from("uploads"));
        assert_eq!(config.uploads.allowed_extensions, vec!["png"]);
    }
}
