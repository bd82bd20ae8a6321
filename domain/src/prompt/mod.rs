//! Prompt templates for the member and lead calls

pub mod template;

pub use template::PromptTemplate;
