//! Progress notification port
//!
//! Defines the interface for reporting progress during crew runs and batches.

use crew_domain::{Phase, ReviewerRole};

/// Callback for progress updates
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, logs, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when a member finishes its review
    fn on_member_complete(&self, phase: &Phase, role: ReviewerRole, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);

    // ==================== Batch Callbacks ====================

    /// Called before an artifact is processed (`index` is zero-based)
    fn on_artifact_start(&self, _path: &str, _index: usize, _total: usize) {}

    /// Called after an artifact was processed or failed
    fn on_artifact_complete(&self, _path: &str, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_member_complete(&self, _phase: &Phase, _role: ReviewerRole, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
