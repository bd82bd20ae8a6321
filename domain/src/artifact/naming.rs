//! Report file naming
//!
//! Reports are named after the artifact's base name (`source/app.py` →
//! `app.md`). Within one batch a name is never handed out twice: a second
//! artifact with the same base name is named after its full relative path
//! (`source/lib/app.py` → `source_lib_app.md`), and a numeric suffix breaks
//! any remaining tie.

use std::collections::HashSet;

const REPORT_EXTENSION: &str = "md";

/// Name assigned to one artifact's report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportName {
    /// File name relative to the reports directory
    pub file_name: String,
    /// Whether the base name was already taken in this batch
    pub collided: bool,
}

/// Hands out unique report names for one batch run
#[derive(Debug, Default)]
pub struct ReportNamer {
    used: HashSet<String>,
}

impl ReportNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a report name for the artifact at `path`
    pub fn assign(&mut self, path: &str) -> ReportName {
        let base = format!("{}.{}", Self::base_stem(path), REPORT_EXTENSION);
        if self.used.insert(base.clone()) {
            return ReportName {
                file_name: base,
                collided: false,
            };
        }

        let encoded = Self::encode_path(path);
        let mut candidate = format!("{}.{}", encoded, REPORT_EXTENSION);
        let mut n = 2;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{}-{}.{}", encoded, n, REPORT_EXTENSION);
            n += 1;
        }

        ReportName {
            file_name: candidate,
            collided: true,
        }
    }

    /// Base name with its last extension removed (`archive.tar.gz` → `archive.tar`)
    fn base_stem(path: &str) -> String {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let stem = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        };
        Self::sanitize(stem)
    }

    /// Whole relative path, extension removed, flattened into one safe segment
    fn encode_path(path: &str) -> String {
        let path = path.trim_start_matches("./");
        let without_ext = match path.rsplit_once('.') {
            Some((head, tail)) if !tail.contains('/') && !head.ends_with('/') => head,
            _ => path,
        };
        Self::sanitize(&without_ext.replace('/', "_"))
    }

    fn sanitize(s: &str) -> String {
        let cleaned: String = s
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
            "report".to_string()
        } else {
            cleaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_used_first() {
        let mut namer = ReportNamer::new();
        assert_eq!(namer.assign("source/app.py").file_name, "app.md");
        assert_eq!(namer.assign("source/widget.js").file_name, "widget.md");
    }

    #[test]
    fn test_collision_falls_back_to_full_path() {
        let mut namer = ReportNamer::new();
        let first = namer.assign("source/app.py");
        let second = namer.assign("source/lib/app.py");
        assert_eq!(first.file_name, "app.md");
        assert!(!first.collided);
        assert_eq!(second.file_name, "source_lib_app.md");
        assert!(second.collided);
    }

    #[test]
    fn test_same_stem_different_extension_collides() {
        let mut namer = ReportNamer::new();
        assert_eq!(namer.assign("source/app.py").file_name, "app.md");
        assert_eq!(namer.assign("source/app.js").file_name, "source_app.md");
    }

    #[test]
    fn test_encoded_collision_gets_suffix() {
        let mut namer = ReportNamer::new();
        namer.assign("source/lib/app.py");
        namer.assign("source/lib/app.js");
        let third = namer.assign("source/lib/app.ts");
        assert_eq!(third.file_name, "source_lib_app-2.md");
    }

    #[test]
    fn test_keeps_inner_dots() {
        let mut namer = ReportNamer::new();
        assert_eq!(namer.assign("source/app.test.js").file_name, "app.test.md");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        let mut namer = ReportNamer::new();
        assert_eq!(namer.assign("source/my app?.py").file_name, "my_app_.md");
    }
}
