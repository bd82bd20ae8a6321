//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys take their defaults.

mod batch;
mod logging;
mod models;
mod providers;
mod server;
mod team;

pub use batch::FileBatchConfig;
pub use logging::FileLoggingConfig;
pub use models::FileModelsConfig;
pub use providers::{FileOpenAiConfig, FileProvidersConfig};
pub use server::FileServerConfig;
pub use team::FileTeamConfig;

use crew_application::TeamParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{field}: model name cannot be empty, using the default model")]
    EmptyModelName { field: String },

    #[error("{field}: timeout cannot be 0, using 1 second")]
    ZeroTimeout { field: String },

    #[error("{field}: allow-list is empty, no file would ever be reviewed")]
    EmptyAllowList { field: String },

    #[error("{field}: path cannot be empty")]
    EmptyPath { field: String },

    #[error("server.stream_buffer cannot be 0, using 1")]
    ZeroStreamBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub error: ConfigValidationError,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", level, self.error)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model per crew seat
    pub models: FileModelsConfig,
    /// Crew run limits
    pub team: FileTeamConfig,
    /// CI batch settings
    pub batch: FileBatchConfig,
    /// Web service settings
    pub server: FileServerConfig,
    /// Backend settings
    pub providers: FileProvidersConfig,
    /// Transcript settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.validate());
        issues.extend(self.team.validate());
        issues.extend(self.batch.validate());
        issues.extend(self.server.validate());
        issues
    }

    /// Whether any issue is severe enough to refuse to start
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Run parameters for the crew
    pub fn team_params(&self) -> TeamParams {
        TeamParams::default()
            .with_member_timeout(self.team.member_timeout())
            .with_synthesis_timeout(self.team.synthesis_timeout())
            .with_stream_buffer(self.server.stream_buffer)
    }
}
