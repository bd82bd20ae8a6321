//! Application layer for code-crew
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::TeamParams;
pub use ports::{
    artifact_store::{ArtifactError, ArtifactStore},
    change_source::{ChangeSource, ChangeSourceError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway, LlmSession, StreamHandle},
    memory::{MemoryError, MemoryStore, NoMemory},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::ask_team::{AskTeamUseCase, TextStream, apology};
pub use use_cases::review_changes::{
    BatchSummary, FailedArtifact, ReviewChangesError, ReviewChangesInput, ReviewChangesUseCase,
    WrittenReport,
};
pub use use_cases::run_team::{
    ReportStream, ReviewerAgent, RunTeamError, RunTeamInput, RunTeamUseCase,
};
