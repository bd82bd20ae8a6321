//! Synthesized crew report.
//!
//! The document layout is fixed:
//!
//! ```text
//! # Code Review Report
//!
//! ## Summary
//!
//! <one paragraph from the lead>
//!
//! ## Code Security Agent
//! ...
//! ```
//!
//! Member sections follow declared role order regardless of the order the
//! findings were collected in. The piecewise renderers ([`TeamReport::preamble`],
//! [`TeamReport::summary_terminator`], [`TeamReport::section`]) concatenate to
//! exactly [`TeamReport::to_markdown`], so a streamed report and a persisted
//! one are byte-identical.

use super::value_objects::{MemberFinding, Synthesis};
use serde::{Deserialize, Serialize};

const TITLE: &str = "Code Review Report";

/// Complete result of one crew run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamReport {
    findings: Vec<MemberFinding>,
    synthesis: Synthesis,
}

impl TeamReport {
    /// Build a report; findings are reordered into declared role order.
    pub fn new(mut findings: Vec<MemberFinding>, synthesis: Synthesis) -> Self {
        findings.sort_by_key(|f| f.role);
        Self {
            findings,
            synthesis,
        }
    }

    pub fn findings(&self) -> &[MemberFinding] {
        &self.findings
    }

    pub fn synthesis(&self) -> &Synthesis {
        &self.synthesis
    }

    pub fn successful_findings(&self) -> impl Iterator<Item = &MemberFinding> {
        self.findings.iter().filter(|f| f.success)
    }

    pub fn failed_findings(&self) -> impl Iterator<Item = &MemberFinding> {
        self.findings.iter().filter(|f| !f.success)
    }

    /// Title and summary heading, emitted before the summary text
    pub fn preamble() -> String {
        format!("# {}\n\n## Summary\n\n", TITLE)
    }

    /// Separator between the summary text and the first section
    pub fn summary_terminator() -> &'static str {
        "\n"
    }

    /// One member section, verbatim content or a missing marker
    pub fn section(finding: &MemberFinding) -> String {
        let body = if finding.success {
            finding.content.trim().to_string()
        } else {
            Self::missing_marker(finding)
        };
        format!("\n## {}\n\n{}\n", finding.role.display_name(), body)
    }

    /// Marker placed where a failed member's section would be
    pub fn missing_marker(finding: &MemberFinding) -> String {
        format!(
            "> **Section missing:** the {} reviewer did not return findings ({}).",
            finding.role,
            finding.error.as_deref().unwrap_or("unknown error")
        )
    }

    /// Render the whole report as markdown
    pub fn to_markdown(&self) -> String {
        let mut out = Self::preamble();
        out.push_str(&self.synthesis.summary);
        out.push_str(Self::summary_terminator());
        for finding in &self.findings {
            out.push_str(&Self::section(finding));
        }
        out
    }
}

impl std::fmt::Display for TeamReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_markdown())
    }
}
