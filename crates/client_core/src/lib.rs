use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::{info, warn};

use shared::{domain::UserId, protocol::RecommendationResult};

pub mod config;
pub mod presentation;
pub mod provider;
pub mod render;

pub use provider::{
    HttpRecommendationProvider, MissingRecommendationProvider, ProviderError,
    RecommendationProvider, StaticFallbackProvider,
};
pub use render::{HighlightList, RenderedGroupItem, RenderedRecommendation};

/// Where the workflow currently is. `Requesting` blocks further
/// submissions until the in-flight one lands or is superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Requesting,
}

/// Point-in-time copy of the workflow state for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowSnapshot {
    pub user_id: String,
    pub phase: Phase,
    pub result: Option<RecommendationResult>,
    pub error_message: Option<String>,
}

/// How a `submit` call concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The live endpoint answered and its body was installed.
    Fetched,
    /// The live endpoint failed; the fallback payload was served.
    FellBack,
    /// Input failed validation; no request was issued.
    Rejected,
    /// A submission was already pending; this one was ignored.
    InFlight,
    /// A reset superseded the submission while it was in flight; the
    /// late result was discarded.
    Superseded,
}

#[derive(Debug, Clone)]
pub enum WorkflowEvent {
    ValidationFailed {
        message: String,
    },
    RequestIssued {
        user_id: UserId,
    },
    ResultInstalled {
        result: RecommendationResult,
        from_fallback: bool,
    },
    Reset,
}

struct WorkflowState {
    user_id: String,
    phase: Phase,
    result: Option<RecommendationResult>,
    error_message: Option<String>,
    // Bumped by every accepted submission and by reset. In-flight work
    // re-checks it before installing, so late results cannot land.
    submission_seq: u64,
}

/// The access-group recommendation workflow.
///
/// Owns the single mutable state; all mutation is serialized behind one
/// mutex so at most one result is ever live. Failures of the live call
/// are never surfaced: the fallback provider answers instead, once per
/// submission, with no retry of the live call.
pub struct RecommendationWorkflow {
    provider: Arc<dyn RecommendationProvider>,
    fallback: Arc<dyn RecommendationProvider>,
    inner: Mutex<WorkflowState>,
    events: broadcast::Sender<WorkflowEvent>,
}

impl RecommendationWorkflow {
    pub fn new(
        provider: Arc<dyn RecommendationProvider>,
        fallback: Arc<dyn RecommendationProvider>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            provider,
            fallback,
            inner: Mutex::new(WorkflowState {
                user_id: String::new(),
                phase: Phase::Idle,
                result: None,
                error_message: None,
                submission_seq: 0,
            }),
            events,
        })
    }

    /// Convenience constructor wiring the demo fallback at its reference
    /// timing.
    pub fn with_demo_fallback(provider: Arc<dyn RecommendationProvider>) -> Arc<Self> {
        Self::new(provider, Arc::new(StaticFallbackProvider::demo()))
    }

    /// Validates the input, then issues exactly one outbound call for
    /// it. Any failure of that call is masked by the fallback provider.
    pub async fn submit(&self, raw_input: &str) -> SubmitOutcome {
        let (user_id, seq) = {
            let mut state = self.inner.lock().await;
            if state.phase == Phase::Requesting {
                return SubmitOutcome::InFlight;
            }
            let user_id = match UserId::parse(raw_input) {
                Ok(user_id) => user_id,
                Err(err) => {
                    // The previous result stays visible; only the
                    // message changes.
                    state.user_id = raw_input.to_string();
                    state.error_message = Some(err.to_string());
                    let _ = self.events.send(WorkflowEvent::ValidationFailed {
                        message: err.to_string(),
                    });
                    return SubmitOutcome::Rejected;
                }
            };
            state.user_id = user_id.as_str().to_string();
            state.result = None;
            state.error_message = None;
            state.phase = Phase::Requesting;
            state.submission_seq += 1;
            (user_id, state.submission_seq)
        };

        info!(user_id = %user_id, "recommendation: request issued");
        let _ = self.events.send(WorkflowEvent::RequestIssued {
            user_id: user_id.clone(),
        });

        match self.provider.fetch(&user_id).await {
            Ok(result) => self.install(seq, result, false).await,
            Err(err) => {
                warn!(user_id = %user_id, "recommendation: request failed, serving fallback: {err}");
                match self.fallback.fetch(&user_id).await {
                    Ok(result) => self.install(seq, result, true).await,
                    Err(fallback_err) => {
                        // Masked like every non-validation failure; the
                        // user sees an idle form, never an error.
                        warn!(user_id = %user_id, "recommendation: fallback failed: {fallback_err}");
                        self.finish_without_result(seq).await;
                        SubmitOutcome::FellBack
                    }
                }
            }
        }
    }

    /// Unconditionally clears identifier, result and error message.
    /// Idempotent. Supersedes any in-flight submission.
    pub async fn reset(&self) {
        {
            let mut state = self.inner.lock().await;
            state.user_id.clear();
            state.result = None;
            state.error_message = None;
            state.phase = Phase::Idle;
            state.submission_seq += 1;
        }
        let _ = self.events.send(WorkflowEvent::Reset);
    }

    pub async fn snapshot(&self) -> WorkflowSnapshot {
        let state = self.inner.lock().await;
        WorkflowSnapshot {
            user_id: state.user_id.clone(),
            phase: state.phase,
            result: state.result.clone(),
            error_message: state.error_message.clone(),
        }
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    async fn install(
        &self,
        seq: u64,
        result: RecommendationResult,
        from_fallback: bool,
    ) -> SubmitOutcome {
        {
            let mut state = self.inner.lock().await;
            if state.submission_seq != seq {
                // A reset happened while the request (or the fallback
                // delay) was pending; the late result must not
                // resurrect cleared state.
                info!("recommendation: discarding superseded result");
                return SubmitOutcome::Superseded;
            }
            state.result = Some(result.clone());
            state.phase = Phase::Idle;
        }
        let _ = self.events.send(WorkflowEvent::ResultInstalled {
            result,
            from_fallback,
        });
        if from_fallback {
            SubmitOutcome::FellBack
        } else {
            SubmitOutcome::Fetched
        }
    }

    async fn finish_without_result(&self, seq: u64) {
        let mut state = self.inner.lock().await;
        if state.submission_seq == seq {
            state.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
