//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No reviewers configured for the crew")]
    EmptyTeam,

    #[error("Reviewer role appears more than once: {0}")]
    DuplicateRole(String),

    #[error("Unknown reviewer role: {0}")]
    UnknownRole(String),
}
