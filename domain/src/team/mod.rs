//! Crew domain: membership, member findings and the synthesized report.
//!
//! - [`entities::TeamSpec`]: fixed, ordered membership plus the lead model
//! - [`value_objects::MemberFinding`]: one member's output (or failure)
//! - [`report::TeamReport`]: summary and per-member sections, rendered as markdown

pub mod entities;
pub mod report;
pub mod value_objects;
