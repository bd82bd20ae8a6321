//! Web service settings from TOML (`[server]` section)

use super::{ConfigIssue, ConfigValidationError, Severity};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// # Example
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
/// image_path = "static/image.png"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
    /// One-shot image served (and deleted) by `GET /image`
    pub image_path: PathBuf,
    /// Report chunks buffered ahead of a slow client
    pub stream_buffer: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            image_path: PathBuf::from("static/image.png"),
            stream_buffer: 32,
        }
    }
}

impl FileServerConfig {
    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.stream_buffer == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                error: ConfigValidationError::ZeroStreamBuffer,
            });
        }
        if self.image_path.as_os_str().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                error: ConfigValidationError::EmptyPath {
                    field: "server.image_path".to_string(),
                },
            });
        }
        issues
    }
}
