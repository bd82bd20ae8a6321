//! Infrastructure layer for code-crew
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod git;
pub mod logging;
pub mod memory;
pub mod providers;
pub mod workspace;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, ConfigValidationError, FileConfig, Severity};
pub use git::GitChangeSource;
pub use logging::JsonlConversationLogger;
pub use memory::InMemoryStore;
pub use providers::openai::OpenAiGateway;
pub use workspace::LocalArtifactStore;
