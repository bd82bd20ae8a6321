//! Review Changes use case: the CI batch driver.
//!
//! Enumerates the files changed between two revisions, keeps those the
//! [`ArtifactFilter`] accepts and runs the crew once per artifact, strictly
//! one after another in diff order. A failure on one artifact is logged and
//! recorded; the batch always runs to the end.

use crate::ports::artifact_store::{ArtifactError, ArtifactStore};
use crate::ports::change_source::{ChangeSource, ChangeSourceError};
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::run_team::{RunTeamError, RunTeamInput, RunTeamUseCase};
use crew_domain::{Artifact, ArtifactFilter, ReportName, ReportNamer};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that stop a batch before any artifact is processed
#[derive(Error, Debug)]
pub enum ReviewChangesError {
    #[error("Could not enumerate changed files: {0}")]
    Changes(#[from] ChangeSourceError),
}

/// Why one artifact produced no report
#[derive(Error, Debug)]
enum ArtifactFailure {
    #[error(transparent)]
    Read(ArtifactError),

    #[error(transparent)]
    Review(#[from] RunTeamError),

    #[error(transparent)]
    Write(ArtifactError),
}

/// Revision range to review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewChangesInput {
    pub before: String,
    pub after: String,
}

impl ReviewChangesInput {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
        }
    }
}

/// A report that was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub path: String,
    pub location: String,
    /// Named after the full path because the base name was taken
    pub collided: bool,
}

/// An artifact that produced no report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedArtifact {
    pub path: String,
    pub error: String,
}

/// Outcome of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of changed paths reported by the diff
    pub considered: usize,
    /// Paths rejected by the filter, in diff order
    pub skipped: Vec<String>,
    pub written: Vec<WrittenReport>,
    pub failed: Vec<FailedArtifact>,
}

impl BatchSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ReviewChangesUseCase<G: LlmGateway + 'static> {
    team: RunTeamUseCase<G>,
    changes: Arc<dyn ChangeSource>,
    store: Arc<dyn ArtifactStore>,
    filter: ArtifactFilter,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> ReviewChangesUseCase<G> {
    pub fn new(
        team: RunTeamUseCase<G>,
        changes: Arc<dyn ChangeSource>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        Self {
            team,
            changes,
            store,
            filter: ArtifactFilter::default(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_filter(mut self, filter: ArtifactFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(&self, input: ReviewChangesInput) -> Result<BatchSummary, ReviewChangesError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: ReviewChangesInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<BatchSummary, ReviewChangesError> {
        let changed = self
            .changes
            .changed_files(&input.before, &input.after)
            .await?;
        info!(
            "{} changed files between {} and {}",
            changed.len(),
            input.before,
            input.after
        );

        let mut summary = BatchSummary {
            considered: changed.len(),
            ..Default::default()
        };

        // Names are fixed up front so reruns over the same diff agree.
        let (accepted, rejected) = self.filter.partition(&changed);
        for path in rejected {
            info!("Skipping {}", path);
            summary.skipped.push(path.to_string());
        }
        let mut namer = ReportNamer::new();
        let queue: Vec<(&str, ReportName)> = accepted
            .into_iter()
            .map(|path| (path, namer.assign(path)))
            .collect();

        let total = queue.len();
        for (index, (path, name)) in queue.into_iter().enumerate() {
            info!("Processing {}", path);
            progress.on_artifact_start(path, index, total);
            if name.collided {
                warn!("Report name for {} collides; writing {}", path, name.file_name);
            }

            match self.process(path, &name, progress).await {
                Ok(location) => {
                    info!("Wrote {}", location);
                    progress.on_artifact_complete(path, true);
                    summary.written.push(WrittenReport {
                        path: path.to_string(),
                        location,
                        collided: name.collided,
                    });
                }
                Err(e) => {
                    error!("Error processing {}: ({})", path, e);
                    progress.on_artifact_complete(path, false);
                    self.logger.log(ConversationEvent::new(
                        "artifact_failed",
                        serde_json::json!({ "path": path, "error": e.to_string() }),
                    ));
                    summary.failed.push(FailedArtifact {
                        path: path.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Batch finished: {} written, {} failed, {} skipped",
            summary.written.len(),
            summary.failed.len(),
            summary.skipped.len()
        );
        Ok(summary)
    }

    async fn process(
        &self,
        path: &str,
        name: &ReportName,
        progress: &dyn ProgressNotifier,
    ) -> Result<String, ArtifactFailure> {
        let content = self.store.read(path).await.map_err(ArtifactFailure::Read)?;
        let artifact = Artifact::new(path, content);

        let report = self
            .team
            .execute_with_progress(RunTeamInput::source(&artifact), progress)
            .await?;

        self.store
            .write_report(&name.file_name, &report.to_markdown())
            .await
            .map_err(ArtifactFailure::Write)
    }
}
