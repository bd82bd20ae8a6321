//! Change source port
//!
//! Enumerates the paths changed between two revisions, in the order the
//! version control system reports them.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangeSourceError {
    #[error("Revision is missing: {0}")]
    MissingRevision(&'static str),

    #[error("Failed to run {command}: {message}")]
    CommandFailed { command: String, message: String },

    #[error("Diff output was not valid UTF-8")]
    InvalidOutput,
}

#[async_trait]
pub trait ChangeSource: Send + Sync {
    /// Paths changed between `before` and `after`, repository-relative
    async fn changed_files(&self, before: &str, after: &str) -> Result<Vec<String>, ChangeSourceError>;
}
