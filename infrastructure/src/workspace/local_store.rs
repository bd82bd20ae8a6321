//! [`ArtifactStore`] over the working tree and a reports directory

use async_trait::async_trait;
use crew_application::{ArtifactError, ArtifactStore};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads artifacts relative to `root`, writes reports into `reports_dir`
pub struct LocalArtifactStore {
    root: PathBuf,
    reports_dir: PathBuf,
}

impl LocalArtifactStore {
    /// A relative `reports_dir` is resolved against `root`.
    pub fn new(root: impl Into<PathBuf>, reports_dir: impl AsRef<Path>) -> Self {
        let root = root.into();
        let reports_dir = root.join(reports_dir);
        Self { root, reports_dir }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn read(&self, path: &str) -> Result<String, ArtifactError> {
        let full = self.root.join(path);
        debug!("Reading {}", full.display());
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| ArtifactError::Read {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    async fn write_report(&self, name: &str, content: &str) -> Result<String, ArtifactError> {
        let write_error = |e: std::io::Error| ArtifactError::Write {
            name: name.to_string(),
            message: e.to_string(),
        };

        tokio::fs::create_dir_all(&self.reports_dir)
            .await
            .map_err(write_error)?;

        let target = self.reports_dir.join(name);
        tokio::fs::write(&target, content)
            .await
            .map_err(write_error)?;

        Ok(target.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("source")).unwrap();
        std::fs::write(dir.path().join("source/app.py"), "x = 1\n").unwrap();
        let store = LocalArtifactStore::new(dir.path(), "reports");

        assert_eq!(store.read("source/app.py").await.unwrap(), "x = 1\n");
    }

    #[tokio::test]
    async fn test_missing_artifact_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path(), "reports");

        let err = store.read("source/gone.py").await.unwrap_err();
        assert!(matches!(err, ArtifactError::Read { ref path, .. } if path == "source/gone.py"));
    }

    #[tokio::test]
    async fn test_non_utf8_artifact_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blob.py"), [0xff, 0xfe, 0x00]).unwrap();
        let store = LocalArtifactStore::new(dir.path(), "reports");

        assert!(store.read("blob.py").await.is_err());
    }

    #[tokio::test]
    async fn test_write_creates_reports_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path(), "reports");

        let location = store.write_report("app.md", "# Report\n").await.unwrap();

        let written = dir.path().join("reports/app.md");
        assert_eq!(location, written.display().to_string());
        assert_eq!(std::fs::read_to_string(written).unwrap(), "# Report\n");
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalArtifactStore::new(dir.path(), "reports");

        store.write_report("app.md", "old").await.unwrap();
        store.write_report("app.md", "new").await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("reports/app.md")).unwrap();
        assert_eq!(content, "new");
    }
}
