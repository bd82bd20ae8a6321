//! Crew domain entities

use crate::core::error::DomainError;
use crate::core::model::Model;
use crate::core::role::ReviewerRole;
use serde::{Deserialize, Serialize};

/// Phase of a crew run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Every member reviews the broadcast prompt
    Review,
    /// The lead writes the executive summary
    Synthesis,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Review => "review",
            Phase::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Review => "Member Review",
            Phase::Synthesis => "Synthesis",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One member slot: a role and the model it runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub role: ReviewerRole,
    pub model: Model,
}

impl MemberSpec {
    pub fn new(role: ReviewerRole, model: Model) -> Self {
        Self { role, model }
    }
}

/// Crew membership (Entity)
///
/// Members are kept in declared role order no matter how they were listed,
/// and each role appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSpec {
    members: Vec<MemberSpec>,
    lead: Model,
}

impl TeamSpec {
    pub fn new(mut members: Vec<MemberSpec>, lead: Model) -> Result<Self, DomainError> {
        if members.is_empty() {
            return Err(DomainError::EmptyTeam);
        }
        members.sort_by_key(|m| m.role);
        if let Some(pair) = members.windows(2).find(|w| w[0].role == w[1].role) {
            return Err(DomainError::DuplicateRole(pair[0].role.to_string()));
        }
        Ok(Self { members, lead })
    }

    /// All three roles on one model, lead included
    pub fn uniform(model: Model) -> Self {
        Self {
            members: ReviewerRole::ALL
                .iter()
                .map(|role| MemberSpec::new(*role, model.clone()))
                .collect(),
            lead: model,
        }
    }

    pub fn members(&self) -> &[MemberSpec] {
        &self.members
    }

    pub fn lead(&self) -> &Model {
        &self.lead
    }

    pub fn roles(&self) -> Vec<ReviewerRole> {
        self.members.iter().map(|m| m.role).collect()
    }
}

impl Default for TeamSpec {
    fn default() -> Self {
        Self::uniform(Model::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_sorted_into_declared_order() {
        let spec = TeamSpec::new(
            vec![
                MemberSpec::new(ReviewerRole::Optimization, Model::default()),
                MemberSpec::new(ReviewerRole::Security, Model::default()),
                MemberSpec::new(ReviewerRole::Debugging, Model::default()),
            ],
            Model::default(),
        )
        .unwrap();
        assert_eq!(spec.roles(), ReviewerRole::ALL.to_vec());
    }

    #[test]
    fn test_empty_team_rejected() {
        assert!(matches!(
            TeamSpec::new(vec![], Model::default()),
            Err(DomainError::EmptyTeam)
        ));
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let result = TeamSpec::new(
            vec![
                MemberSpec::new(ReviewerRole::Security, Model::new("a")),
                MemberSpec::new(ReviewerRole::Security, Model::new("b")),
            ],
            Model::default(),
        );
        assert!(matches!(result, Err(DomainError::DuplicateRole(r)) if r == "security"));
    }

    #[test]
    fn test_default_is_full_crew() {
        let spec = TeamSpec::default();
        assert_eq!(spec.members().len(), 3);
        assert_eq!(spec.lead(), &Model::default());
    }
}
