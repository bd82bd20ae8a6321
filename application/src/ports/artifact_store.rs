//! Artifact store port
//!
//! Reads changed source files and persists the reports written for them.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to write report {name}: {message}")]
    Write { name: String, message: String },
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Text content of the artifact at a repository-relative path
    async fn read(&self, path: &str) -> Result<String, ArtifactError>;

    /// Persist a report under `name` and return where it was written
    async fn write_report(&self, name: &str, content: &str) -> Result<String, ArtifactError>;
}
