//! Domain layer for code-crew
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Crew
//!
//! A crew is a fixed, ordered set of reviewer roles (security, debugging,
//! optimization) led by an aggregator:
//!
//! - **Broadcast**: every member receives the identical prompt
//! - **Report**: a summary paragraph followed by one section per member,
//!   always in declared membership order
//!
//! ## Artifacts
//!
//! Changed source files pass through an [`ArtifactFilter`] and get a report
//! file name from a [`ReportNamer`], which never hands out the same name twice.

pub mod artifact;
pub mod core;
pub mod prompt;
pub mod session;
pub mod team;
pub mod util;

// Re-export commonly used types
pub use artifact::{
    entities::Artifact,
    filter::ArtifactFilter,
    naming::{ReportName, ReportNamer},
};
pub use core::{error::DomainError, model::Model, role::ReviewerRole};
pub use prompt::PromptTemplate;
pub use session::{
    entities::{Message, Role},
    id::{SessionError, SessionId},
    stream::StreamEvent,
};
pub use team::{
    entities::{MemberSpec, Phase, TeamSpec},
    report::TeamReport,
    value_objects::{MemberFinding, Synthesis},
};
