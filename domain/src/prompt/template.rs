//! Prompt templates for the crew flow

use crate::core::role::ReviewerRole;
use crate::session::entities::{Message, Role};
use crate::team::value_objects::MemberFinding;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Broadcast prompt for a source artifact
    pub fn review_source(source: &str) -> String {
        format!(
            r#"Solicit input from other agents regarding the following source code:

[START SOURCE CODE]
{}
[END SOURCE CODE]

Important: This source code must be provided to all other agents."#,
            source
        )
    }

    /// Broadcast prompt for an interactive query
    pub fn query(input: &str) -> String {
        format!(
            r#"Solicit input from other agents regarding the following request:

[START REQUEST]
{}
[END REQUEST]

Important: This request must be provided to all other agents."#,
            input
        )
    }

    /// Prompt sent to each member: prior session turns, then the broadcast.
    ///
    /// Every member receives exactly this text for a given run.
    pub fn member_prompt(broadcast: &str, history: &[Message]) -> String {
        let mut prompt = Self::history_block(history);
        prompt.push_str(broadcast);
        prompt
    }

    /// System prompt for the lead
    pub fn lead_system(roles: &[ReviewerRole]) -> String {
        let mut prompt = String::from(
            r#"You lead a team of code reviewers. Each reviewer has already examined the same input.
Your task is to write a single-paragraph executive summary of their findings for a professionally
formatted markdown report. Reference every reviewer's findings. Do not repeat their code snippets;
their sections are appended after your summary verbatim.

Team members:
"#,
        );
        for role in roles {
            prompt.push_str(&format!("- {}: {}\n", role.display_name(), role.description()));
        }
        prompt
    }

    /// User prompt for the summary
    pub fn summary_prompt(broadcast: &str, findings: &[MemberFinding], history: &[Message]) -> String {
        let mut prompt = Self::history_block(history);
        prompt.push_str(&format!("Original request:\n{}\n\nReviewer findings:\n", broadcast));

        for finding in findings {
            if finding.success {
                prompt.push_str(&format!(
                    "\n--- {} ---\n{}\n",
                    finding.role.display_name(),
                    finding.content
                ));
            } else {
                prompt.push_str(&format!(
                    "\n--- {} ---\n(no findings: this reviewer failed to respond)\n",
                    finding.role.display_name()
                ));
            }
        }

        prompt.push_str(
            r#"
Write exactly one paragraph summarizing the reviewers' findings. Mention each reviewer by name.
Return only the paragraph, without headers."#,
        );

        prompt
    }

    fn history_block(history: &[Message]) -> String {
        if history.is_empty() {
            return String::new();
        }
        let mut block = String::from("Earlier in this conversation:\n");
        for message in history {
            let speaker = match message.role {
                Role::User => "User",
                Role::Assistant => "Team",
            };
            block.push_str(&format!("\n[{}]\n{}\n", speaker, message.content));
        }
        block.push_str("\n[Current request]\n");
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_source_embeds_code() {
        let prompt = PromptTemplate::review_source("print('hi')");
        assert!(prompt.contains("[START SOURCE CODE]\nprint('hi')\n[END SOURCE CODE]"));
        assert!(prompt.contains("must be provided to all other agents"));
    }

    #[test]
    fn test_member_prompt_without_history_is_broadcast() {
        let broadcast = PromptTemplate::query("Is eval safe?");
        assert_eq!(PromptTemplate::member_prompt(&broadcast, &[]), broadcast);
    }

    #[test]
    fn test_member_prompt_carries_history() {
        let history = vec![
            Message::user("My service is called Falcon."),
            Message::assistant("Noted."),
        ];
        let prompt = PromptTemplate::member_prompt("now?", &history);
        assert!(prompt.starts_with("Earlier in this conversation:"));
        assert!(prompt.contains("[User]\nMy service is called Falcon."));
        assert!(prompt.ends_with("[Current request]\nnow?"));
    }

    #[test]
    fn test_lead_system_lists_members() {
        let prompt = PromptTemplate::lead_system(&ReviewerRole::ALL);
        assert!(prompt.contains("Code Security Agent"));
        assert!(prompt.contains("Code Optimization Agent"));
    }

    #[test]
    fn test_summary_prompt_notes_missing_member() {
        let findings = vec![
            MemberFinding::success(ReviewerRole::Security, "SQL injection in query()"),
            MemberFinding::failure(ReviewerRole::Debugging, "timeout"),
        ];
        let prompt = PromptTemplate::summary_prompt("req", &findings, &[]);
        assert!(prompt.contains("SQL injection in query()"));
        assert!(prompt.contains("--- Code Debugging Agent ---\n(no findings"));
    }
}
