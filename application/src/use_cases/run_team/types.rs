//! Type definitions for the RunTeam use case.

use crew_domain::{Artifact, PromptTemplate};
use thiserror::Error;

/// Errors that can occur during a crew run
#[derive(Error, Debug, Clone)]
pub enum RunTeamError {
    #[error("No reviewers configured")]
    NoMembers,

    #[error("Every reviewer failed: {0}")]
    AllMembersFailed(String),
}

/// Input for one crew run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTeamInput {
    /// Broadcast prompt, delivered identically to every member
    pub prompt: String,
    /// What the caller asked, as remembered in session memory
    pub request: String,
}

impl RunTeamInput {
    /// Review a source artifact
    pub fn source(artifact: &Artifact) -> Self {
        Self {
            prompt: PromptTemplate::review_source(artifact.content()),
            request: format!("Review of {}", artifact.path()),
        }
    }

    /// Answer an interactive query
    pub fn query(input: &str) -> Self {
        Self {
            prompt: PromptTemplate::query(input),
            request: input.to_string(),
        }
    }
}
