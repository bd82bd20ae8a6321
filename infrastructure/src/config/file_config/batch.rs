//! Batch review settings from TOML (`[batch]` section)

use super::{ConfigIssue, ConfigValidationError, Severity};
use crew_domain::ArtifactFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which changed files get reviewed, and where reports go
///
/// # Example
///
/// ```toml
/// [batch]
/// roots = ["source/", "lib/"]
/// extensions = ["py", "js", "ts"]
/// reports_dir = "reports"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBatchConfig {
    /// Accepted path prefixes; empty accepts any directory
    pub roots: Vec<String>,
    /// Accepted extensions, with or without the leading dot
    pub extensions: Vec<String>,
    pub reports_dir: PathBuf,
}

impl Default for FileBatchConfig {
    fn default() -> Self {
        let filter = ArtifactFilter::default();
        Self {
            roots: filter.roots().to_vec(),
            extensions: filter.extensions().to_vec(),
            reports_dir: PathBuf::from("reports"),
        }
    }
}

impl FileBatchConfig {
    pub fn to_filter(&self) -> ArtifactFilter {
        ArtifactFilter::new(self.roots.iter().cloned(), self.extensions.iter().cloned())
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                error: ConfigValidationError::EmptyAllowList {
                    field: "batch.extensions".to_string(),
                },
            });
        }
        if self.reports_dir.as_os_str().is_empty() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                error: ConfigValidationError::EmptyPath {
                    field: "batch.reports_dir".to_string(),
                },
            });
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_config() {
        let config: super::super::FileConfig = toml::from_str(
            r#"
[batch]
roots = ["lib/"]
extensions = [".TS"]
"#,
        )
        .unwrap();

        let filter = config.batch.to_filter();
        assert!(filter.accepts("lib/index.ts"));
        assert!(!filter.accepts("source/app.py"));
        assert_eq!(config.batch.reports_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_empty_extensions_is_error() {
        let batch = FileBatchConfig {
            extensions: Vec::new(),
            ..Default::default()
        };
        let issues = batch.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }
}
