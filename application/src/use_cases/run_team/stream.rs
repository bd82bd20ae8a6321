//! Incremental report delivery.
//!
//! The review phase has no useful partial output, so the stream opens with
//! the report preamble only once the findings are in. The lead's summary is
//! forwarded as it arrives; the member sections follow. Concatenating every
//! chunk yields exactly [`TeamReport::to_markdown`] of the final report.

use super::{RunTeamError, RunTeamInput, RunTeamUseCase};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::NoProgress;
use crew_domain::{MemberFinding, Message, PromptTemplate, StreamEvent, Synthesis, TeamReport};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

type Chunk = Result<String, RunTeamError>;

/// Ordered report chunks produced by [`RunTeamUseCase::execute_streaming`].
///
/// Dropping the stream stops the run.
pub struct ReportStream {
    receiver: mpsc::Receiver<Chunk>,
}

impl ReportStream {
    fn new(receiver: mpsc::Receiver<Chunk>) -> Self {
        Self { receiver }
    }

    /// Drain the stream into one string, stopping at the first error
    pub async fn collect_text(mut self) -> Result<String, RunTeamError> {
        let mut out = String::new();
        while let Some(chunk) = self.receiver.recv().await {
            out.push_str(&chunk?);
        }
        Ok(out)
    }
}

impl Stream for ReportStream {
    type Item = Chunk;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl<G: LlmGateway + 'static> RunTeamUseCase<G> {
    /// Run the crew in a background task and stream the report.
    ///
    /// An aggregation failure arrives as a single `Err` item before any text.
    pub fn execute_streaming(self, input: RunTeamInput) -> ReportStream {
        let (tx, rx) = mpsc::channel(self.params.stream_buffer);

        tokio::spawn(async move {
            tokio::select! {
                _ = tx.closed() => {
                    debug!("Report consumer went away, stopping run");
                }
                _ = self.produce(&input, &tx) => {}
            }
        });

        ReportStream::new(rx)
    }

    async fn produce(&self, input: &RunTeamInput, tx: &mpsc::Sender<Chunk>) {
        let history = self.load_history().await;

        let findings = match self.phase_review(input, &history, &NoProgress).await {
            Ok(findings) => findings,
            Err(e) => {
                let _ = tx.send(Err(e)).await;
                return;
            }
        };

        if tx.send(Ok(TeamReport::preamble())).await.is_err() {
            return;
        }
        let Some(synthesis) = self.stream_synthesis(input, &findings, &history, tx).await else {
            return;
        };
        if tx
            .send(Ok(TeamReport::summary_terminator().to_string()))
            .await
            .is_err()
        {
            return;
        }

        let report = TeamReport::new(findings, synthesis);
        for finding in report.findings() {
            if tx.send(Ok(TeamReport::section(finding))).await.is_err() {
                return;
            }
        }

        self.remember(input, &report).await;
        self.log_run(input, &report);
    }

    /// Forward the lead's summary as it arrives.
    ///
    /// Returns the summary exactly as streamed, or `None` if the consumer left.
    async fn stream_synthesis(
        &self,
        input: &RunTeamInput,
        findings: &[MemberFinding],
        history: &[Message],
        tx: &mpsc::Sender<Chunk>,
    ) -> Option<Synthesis> {
        let lead = self.team.lead();
        let deadline = Instant::now() + self.params.synthesis_timeout;

        let opened = tokio::time::timeout_at(deadline, async {
            let session = self
                .gateway
                .create_session_with_system_prompt(lead, &PromptTemplate::lead_system(&self.team.roles()))
                .await?;
            session
                .send_streaming(&PromptTemplate::summary_prompt(&input.prompt, findings, history))
                .await
        })
        .await
        .map_err(|_| GatewayError::Timeout)
        .and_then(std::convert::identity);

        let mut handle = match opened {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Lead synthesis failed: {}", e);
                let synthesis = Synthesis::fallback(lead.to_string(), findings, &e.to_string());
                tx.send(Ok(synthesis.summary.clone())).await.ok()?;
                return Some(synthesis);
            }
        };

        let mut summary = String::new();
        let failure = loop {
            match tokio::time::timeout_at(deadline, handle.receiver.recv()).await {
                Err(_) => break Some(GatewayError::Timeout),
                Ok(None) => break None,
                Ok(Some(StreamEvent::Delta(chunk))) => {
                    summary.push_str(&chunk);
                    tx.send(Ok(chunk)).await.ok()?;
                }
                Ok(Some(StreamEvent::Completed(text))) => {
                    if summary.is_empty() {
                        summary.push_str(&text);
                        tx.send(Ok(text)).await.ok()?;
                    }
                    break None;
                }
                Ok(Some(StreamEvent::Error(e))) => break Some(GatewayError::RequestFailed(e)),
            }
        };

        if failure.is_none() && !summary.trim().is_empty() {
            return Some(Synthesis::new(lead.to_string(), summary));
        }

        let reason = failure
            .map(|e| e.to_string())
            .unwrap_or_else(|| "empty summary returned".to_string());
        warn!("Lead synthesis failed: {}", reason);

        // Whatever was already sent stays part of the summary.
        let addendum = if summary.trim().is_empty() {
            Synthesis::fallback(lead.to_string(), findings, &reason).summary
        } else {
            format!("\n\n_(summary interrupted: {})_", reason)
        };
        tx.send(Ok(addendum.clone())).await.ok()?;
        summary.push_str(&addendum);

        Some(Synthesis {
            lead: lead.to_string(),
            summary,
            fallback: true,
        })
    }
}
