//! Path/extension allow-list for changed files

use serde::{Deserialize, Serialize};

/// Decides which changed paths are sent to the crew (Value Object)
///
/// A path is accepted when it starts with one of `roots` and its extension
/// is one of `extensions`. An empty `roots` list accepts any directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactFilter {
    roots: Vec<String>,
    extensions: Vec<String>,
}

impl ArtifactFilter {
    pub fn new<R, E>(roots: R, extensions: E) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            extensions: extensions
                .into_iter()
                .map(|e| e.into().trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Check a repository-relative path against the allow-list
    pub fn accepts(&self, path: &str) -> bool {
        let path = path.trim().trim_start_matches("./");
        if path.is_empty() {
            return false;
        }

        let root_ok = self.roots.is_empty()
            || self
                .roots
                .iter()
                .any(|root| path.starts_with(root.trim_start_matches("./")));

        let file_name = path.rsplit('/').next().unwrap_or(path);
        let ext_ok = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            }
            _ => false,
        };

        root_ok && ext_ok
    }

    /// Split paths into `(accepted, rejected)`, both in their original order
    pub fn partition<'a>(&self, paths: &'a [String]) -> (Vec<&'a str>, Vec<&'a str>) {
        paths
            .iter()
            .map(String::as_str)
            .partition(|p| self.accepts(p))
    }
}

impl Default for ArtifactFilter {
    fn default() -> Self {
        Self::new(["source/"], ["py", "js"])
    }
}
