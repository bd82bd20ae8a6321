//! Crew run limits from TOML (`[team]` section)

use super::{ConfigIssue, ConfigValidationError, Severity};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// # Example
///
/// ```toml
/// [team]
/// member_timeout_secs = 60
/// synthesis_timeout_secs = 90
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTeamConfig {
    /// Upper bound for one reviewer's answer
    pub member_timeout_secs: u64,
    /// Upper bound for the lead's summary
    pub synthesis_timeout_secs: u64,
}

impl Default for FileTeamConfig {
    fn default() -> Self {
        Self {
            member_timeout_secs: 120,
            synthesis_timeout_secs: 180,
        }
    }
}

impl FileTeamConfig {
    pub fn member_timeout(&self) -> Duration {
        Duration::from_secs(self.member_timeout_secs.max(1))
    }

    pub fn synthesis_timeout(&self) -> Duration {
        Duration::from_secs(self.synthesis_timeout_secs.max(1))
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("team.member_timeout_secs", self.member_timeout_secs),
            ("team.synthesis_timeout_secs", self.synthesis_timeout_secs),
        ]
        .into_iter()
        .filter(|(_, secs)| *secs == 0)
        .map(|(field, _)| ConfigIssue {
            severity: Severity::Warning,
            error: ConfigValidationError::ZeroTimeout {
                field: field.to_string(),
            },
        })
        .collect()
    }
}
