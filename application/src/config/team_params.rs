//! Team parameters: crew run control.
//!
//! [`TeamParams`] groups the static parameters that bound a
//! [`RunTeamUseCase`](crate::use_cases::run_team::RunTeamUseCase) run.
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Crew run control parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamParams {
    /// Upper bound for one member's review call. Expiry counts as a member failure.
    pub member_timeout: Duration,
    /// Upper bound for the lead's summary call, streaming included.
    pub synthesis_timeout: Duration,
    /// Channel capacity between the streaming producer and its consumer.
    pub stream_buffer: usize,
}

impl Default for TeamParams {
    fn default() -> Self {
        Self {
            member_timeout: Duration::from_secs(120),
            synthesis_timeout: Duration::from_secs(180),
            stream_buffer: 32,
        }
    }
}

impl TeamParams {
    // ==================== Builder Methods ====================

    pub fn with_member_timeout(mut self, timeout: Duration) -> Self {
        self.member_timeout = timeout;
        self
    }

    pub fn with_synthesis_timeout(mut self, timeout: Duration) -> Self {
        self.synthesis_timeout = timeout;
        self
    }

    pub fn with_stream_buffer(mut self, capacity: usize) -> Self {
        self.stream_buffer = capacity.max(1);
        self
    }
}
