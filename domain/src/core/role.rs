//! Reviewer role value object
//!
//! Each role carries a fixed instruction policy. The declared order of
//! [`ReviewerRole::ALL`] is the order member sections appear in every report.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Specialization of a crew member (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewerRole {
    Security,
    Debugging,
    Optimization,
}

impl ReviewerRole {
    /// All roles in declared membership order
    pub const ALL: [ReviewerRole; 3] = [
        ReviewerRole::Security,
        ReviewerRole::Debugging,
        ReviewerRole::Optimization,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewerRole::Security => "security",
            ReviewerRole::Debugging => "debugging",
            ReviewerRole::Optimization => "optimization",
        }
    }

    /// Member name shown as the section heading in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ReviewerRole::Security => "Code Security Agent",
            ReviewerRole::Debugging => "Code Debugging Agent",
            ReviewerRole::Optimization => "Code Optimization Agent",
        }
    }

    /// One-line responsibility, shared with the lead so it knows who does what
    pub fn description(&self) -> &'static str {
        match self {
            ReviewerRole::Security => "Examines source code for potential security issues.",
            ReviewerRole::Debugging => "Examines source code for potential bugs.",
            ReviewerRole::Optimization => {
                "Examines source code and recommends ways to optimize it."
            }
        }
    }

    /// System instructions for a member of this role
    pub fn instructions(&self) -> &'static str {
        match self {
            ReviewerRole::Security => {
                r#"You are an expert in writing secure code.
Review the source code provided to you for serious security issues.
Call out specific vulnerabilities in the code; don't resort to generalities.
Provide before-and-after code snippets demonstrating how to apply fixes to existing code.
Focus solely on security. If no security issues are found, explicitly state that.
Format your findings as markdown."#
            }
            ReviewerRole::Debugging => {
                r#"You are an expert in writing bug-free code.
Review the source code provided to you for potential bugs.
Call out specific bugs you find in the code; don't resort to generalities.
Provide before-and-after code snippets demonstrating how to apply fixes to existing code.
Focus on finding and fixing bugs. If no bugs are found, explicitly state that.
Format your findings as markdown."#
            }
            ReviewerRole::Optimization => {
                r#"You are an expert in writing fast, efficient, readable code.
Review the source code provided to you and recommend ways to optimize it.
Call out specific issues you find in the code; don't resort to generalities.
Provide before-and-after code snippets demonstrating how to apply fixes to existing code.
If no optimizations are recommended, explicitly state that.
Format your findings as markdown."#
            }
        }
    }
}

impl std::fmt::Display for ReviewerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReviewerRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "security" => Ok(ReviewerRole::Security),
            "debugging" | "debug" => Ok(ReviewerRole::Debugging),
            "optimization" | "optimisation" | "perf" => Ok(ReviewerRole::Optimization),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}
