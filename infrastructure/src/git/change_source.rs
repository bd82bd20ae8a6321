//! [`ChangeSource`] backed by `git diff --name-only -z`

use async_trait::async_trait;
use crew_application::{ChangeSource, ChangeSourceError};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

/// Hash of the empty tree, for diffing a first push against nothing
const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

pub struct GitChangeSource {
    repo: PathBuf,
}

impl GitChangeSource {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    /// CI reports an absent or all-zero "before" on a branch's first push.
    fn is_null_revision(rev: &str) -> bool {
        let rev = rev.trim();
        rev.is_empty() || rev.chars().all(|c| c == '0')
    }

    /// Paths are NUL-terminated and unquoted under `-z`.
    fn parse_output(stdout: Vec<u8>) -> Result<Vec<String>, ChangeSourceError> {
        let text = String::from_utf8(stdout).map_err(|_| ChangeSourceError::InvalidOutput)?;
        Ok(text
            .split('\0')
            .filter(|path| !path.is_empty())
            .map(String::from)
            .collect())
    }
}

#[async_trait]
impl ChangeSource for GitChangeSource {
    async fn changed_files(&self, before: &str, after: &str) -> Result<Vec<String>, ChangeSourceError> {
        let after = after.trim();
        if after.is_empty() {
            return Err(ChangeSourceError::MissingRevision("after"));
        }
        let before = if Self::is_null_revision(before) {
            warn!("No previous revision; reviewing every file in {}", after);
            EMPTY_TREE
        } else {
            before.trim()
        };

        let range = format!("{}..{}", before, after);
        let command = format!("git diff --name-only -z {}", range);
        debug!("Running {} in {}", command, self.repo.display());

        let output = Command::new("git")
            .args(["diff", "--name-only", "-z", "--end-of-options", &range])
            .current_dir(&self.repo)
            .output()
            .await
            .map_err(|e| ChangeSourceError::CommandFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ChangeSourceError::CommandFailed {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Self::parse_output(output.stdout)
    }
}
