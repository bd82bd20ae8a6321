//! Configuration file loading for code-crew
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CODE_CREW_*` environment variables (`CODE_CREW_SERVER__PORT=8080`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./code-crew.toml` or `./.code-crew.toml`
//! 4. Global: `$XDG_CONFIG_HOME/code-crew/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigValidationError, FileBatchConfig, FileConfig, FileLoggingConfig,
    FileModelsConfig, FileOpenAiConfig, FileProvidersConfig, FileServerConfig, FileTeamConfig,
    Severity,
};
pub use loader::ConfigLoader;
