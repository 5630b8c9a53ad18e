//! Request lifecycle tracking for generation submissions.
//!
//! A submission moves through a single tagged state: `Idle` until the
//! first submit, `Pending` while the backend renders, then exactly one
//! of `Succeeded` or `Failed`. Re-submitting from a terminal state goes
//! straight back to `Pending`.

use crate::api::{ApiError, GeneratorClient, JobResponse};
use crate::video_config::VideoConfig;

/// Outcome of one generation request, as delivered to the controller.
pub type GenerationOutcome = Result<JobResponse, ApiError>;

/// State of the current (or most recent) generation request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    /// No request has been submitted yet.
    #[default]
    Idle,
    /// A request is in flight; no new submission may start.
    Pending,
    /// The last request completed; the response is kept for display.
    Succeeded { result: JobResponse },
    /// The last request failed; the message is ready for display.
    Failed { message: String },
}

impl RequestState {
    /// Short lowercase label for status line display.
    pub fn name(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Pending => "pending",
            RequestState::Succeeded { .. } => "succeeded",
            RequestState::Failed { .. } => "failed",
        }
    }

    /// Whether a request is currently in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// Whether the state is a settled outcome (succeeded or failed).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Succeeded { .. } | RequestState::Failed { .. }
        )
    }
}

/// Error returned when a submission cannot be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("a generation request is already pending")]
    AlreadyPending,
}

/// Drives the request lifecycle and enforces one request at a time.
///
/// The controller owns the [`RequestState`] and is the only place that
/// mutates it. Callers either use the split-phase pair
/// [`begin_submission`](RequestController::begin_submission) /
/// [`resolve`](RequestController::resolve) (the event loop hands the
/// HTTP call to a background task in between), or the blocking
/// [`submit`](RequestController::submit) convenience that does both.
#[derive(Debug, Default)]
pub struct RequestController {
    state: RequestState,
    submissions: u32,
}

impl RequestController {
    /// Create a new controller in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            submissions: 0,
        }
    }

    /// The current request state.
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Number of submissions started so far.
    pub fn submissions(&self) -> u32 {
        self.submissions
    }

    /// Whether a request is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.state.is_pending()
    }

    /// Mark the start of a new submission.
    ///
    /// Moves to `Pending` from `Idle` or from a terminal state. While a
    /// request is already pending the attempt is rejected and the state
    /// is left untouched, so at most one request is in flight.
    pub fn begin_submission(&mut self) -> Result<(), SubmitError> {
        if self.state.is_pending() {
            log::warn!("Submission rejected: a request is already pending");
            return Err(SubmitError::AlreadyPending);
        }

        self.submissions += 1;
        self.state = RequestState::Pending;
        log::info!("Submission #{} started", self.submissions);
        Ok(())
    }

    /// Settle the pending request with its outcome.
    ///
    /// A success stores the backend response, a failure stores the
    /// user-facing message derived from the error. Outcomes delivered
    /// while no request is pending are logged and ignored, so each
    /// submission settles exactly once.
    pub fn resolve(&mut self, outcome: GenerationOutcome) {
        if !self.state.is_pending() {
            log::warn!(
                "Ignoring request outcome delivered in {} state",
                self.state.name()
            );
            return;
        }

        match outcome {
            Ok(result) => {
                log::info!("Request succeeded, job_id: {}", result.job_id);
                self.state = RequestState::Succeeded { result };
            }
            Err(err) => {
                log::warn!("Request failed: {}", err);
                self.state = RequestState::Failed {
                    message: err.user_message(),
                };
            }
        }
    }

    /// Run one full submission against the backend and settle the state.
    ///
    /// Convenience for callers without an event loop: begins the
    /// submission, performs the HTTP request, and resolves with its
    /// outcome. The settled state is read back via
    /// [`state`](RequestController::state).
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::AlreadyPending` when a request is already
    /// in flight; the state is left untouched in that case.
    pub async fn submit(
        &mut self,
        client: &GeneratorClient,
        config: &VideoConfig,
    ) -> Result<(), SubmitError> {
        self.begin_submission()?;
        let outcome = client.generate(config).await;
        self.resolve(outcome);
        Ok(())
    }
}
