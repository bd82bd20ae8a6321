//! Crew value objects - immutable results of one crew run.
//!
//! - [`MemberFinding`] - one member's review, or why it is missing
//! - [`Synthesis`] - the lead's executive summary

use crate::core::role::ReviewerRole;
use serde::{Deserialize, Serialize};

/// Output from a single member in the review phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFinding {
    /// The member that produced this finding
    pub role: ReviewerRole,
    /// The findings text (markdown)
    pub content: String,
    /// Whether the member responded
    pub success: bool,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MemberFinding {
    /// Creates a successful finding.
    pub fn success(role: ReviewerRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            success: true,
            error: None,
        }
    }

    /// Creates a finding recording that the member could not answer.
    pub fn failure(role: ReviewerRole, error: impl Into<String>) -> Self {
        Self {
            role,
            content: String::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Executive summary written by the lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesis {
    /// The model that wrote the summary
    pub lead: String,
    /// One-paragraph summary
    pub summary: String,
    /// Set when the lead failed and the summary was assembled locally
    #[serde(default)]
    pub fallback: bool,
}

impl Synthesis {
    pub fn new(lead: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            lead: lead.into(),
            summary: summary.into(),
            fallback: false,
        }
    }

    /// Summary used when the lead cannot be reached: lists who reported.
    pub fn fallback(lead: impl Into<String>, findings: &[MemberFinding], reason: &str) -> Self {
        let reported: Vec<&str> = findings
            .iter()
            .filter(|f| f.success)
            .map(|f| f.role.display_name())
            .collect();
        let summary = format!(
            "An executive summary could not be generated ({}). Findings were received from: {}. \
             See the sections below for details.",
            reason,
            if reported.is_empty() {
                "no reviewers".to_string()
            } else {
                reported.join(", ")
            }
        );
        Self {
            lead: lead.into(),
            summary,
            fallback: true,
        }
    }
}
