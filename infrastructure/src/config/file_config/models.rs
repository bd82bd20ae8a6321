//! Crew model configuration from TOML (`[models]` section)

use super::{ConfigIssue, ConfigValidationError, Severity};
use crew_domain::{DomainError, MemberSpec, Model, ReviewerRole, TeamSpec};
use serde::{Deserialize, Serialize};

/// Model per crew seat
///
/// # Example
///
/// ```toml
/// [models]
/// lead = "o3-mini"          # Writes the executive summary
/// security = "o3-mini"
/// debugging = "o3-mini"
/// optimization = "gpt-4o"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub lead: String,
    pub security: String,
    pub debugging: String,
    pub optimization: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            lead: Model::DEFAULT.to_string(),
            security: Model::DEFAULT.to_string(),
            debugging: Model::DEFAULT.to_string(),
            optimization: Model::DEFAULT.to_string(),
        }
    }
}

impl FileModelsConfig {
    fn member_model(&self, role: ReviewerRole) -> &str {
        match role {
            ReviewerRole::Security => &self.security,
            ReviewerRole::Debugging => &self.debugging,
            ReviewerRole::Optimization => &self.optimization,
        }
    }

    /// Every seat as `(field, value)`
    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("lead", &self.lead),
            ("security", &self.security),
            ("debugging", &self.debugging),
            ("optimization", &self.optimization),
        ]
    }

    /// Build the crew; empty names fall back to the default model.
    pub fn to_team_spec(&self) -> Result<TeamSpec, DomainError> {
        let members = ReviewerRole::ALL
            .into_iter()
            .map(|role| MemberSpec::new(role, Self::parse_model(self.member_model(role))))
            .collect();
        TeamSpec::new(members, Self::parse_model(&self.lead))
    }

    fn parse_model(name: &str) -> Model {
        let model = Model::new(name);
        if model.is_empty() { Model::default() } else { model }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| ConfigIssue {
                severity: Severity::Warning,
                error: ConfigValidationError::EmptyModelName {
                    field: format!("models.{}", field),
                },
            })
            .collect()
    }
}
