use std::time::Instant;

use protocol::{AnalysisRequest, AnalysisResult};
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::render::{render, ResultView};
use crate::service::AnalysisService;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    /// A request is in flight; the trigger is disabled.
    Busy,
    /// Resting state after a failure; the trigger stays enabled.
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub min_text_chars: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_text_chars: protocol::config::DEFAULT_MIN_TEXT_CHARS,
        }
    }
}

/// A request handed out by [`AnalysisController::begin`].
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub id: Uuid,
    pub request: AnalysisRequest,
}

/// Request lifecycle for one analysis form.
#[derive(Debug, Default)]
pub struct AnalysisController {
    config: ControllerConfig,
    state: UiState,
    view: Option<ResultView>,
    in_flight: Option<InFlight>,
}

#[derive(Debug)]
struct InFlight {
    id: Uuid,
    started: Instant,
}

impl AnalysisController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view(&self) -> Option<&ResultView> {
        self.view.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.state == UiState::Busy
    }

    pub fn trigger_enabled(&self) -> bool {
        !self.is_busy()
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn min_text_chars(&self) -> usize {
        self.config.min_text_chars
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.state, UiState::Error(_)) {
            self.state = UiState::Idle;
        }
    }

    /// Validates the input and enters Busy.
    ///
    /// Returns `Ok(None)` while another request is in flight.
    pub fn begin(
        &mut self,
        raw_text: &str,
        raw_url: &str,
    ) -> Result<Option<PendingAnalysis>, AnalysisError> {
        if self.is_busy() {
            tracing::debug!(event = "analysis.submit.ignored", reason = "busy");
            return Ok(None);
        }
        let request = AnalysisRequest::from_input(raw_text, raw_url);
        if let Err(err) = self.validate(&request) {
            tracing::info!(event = "analysis.submit.rejected", error = %err);
            self.state = UiState::Error(err.user_message());
            return Err(err);
        }

        let id = Uuid::new_v4();
        tracing::info!(
            event = "analysis.request.start",
            request_id = %id,
            text_chars = request.text_chars(),
            has_url = request.url.is_some(),
        );
        self.view = None;
        self.state = UiState::Busy;
        self.in_flight = Some(InFlight {
            id,
            started: Instant::now(),
        });
        Ok(Some(PendingAnalysis { id, request }))
    }

    /// Leaves Busy with the outcome of the in-flight request.
    pub fn finish(
        &mut self,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<(), AnalysisError> {
        let Some(in_flight) = self.in_flight.take() else {
            tracing::warn!(event = "analysis.finish.unexpected", "no request in flight");
            return Ok(());
        };
        let elapsed_ms = in_flight.started.elapsed().as_millis() as u64;
        match outcome {
            Ok(result) => {
                tracing::info!(
                    event = "analysis.request.done",
                    request_id = %in_flight.id,
                    elapsed_ms,
                    verdict = %result.verdict_level,
                );
                self.view = Some(render(&result));
                self.state = UiState::Idle;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    event = "analysis.request.failed",
                    request_id = %in_flight.id,
                    elapsed_ms,
                    kind = err.kind(),
                    error = %err,
                );
                self.state = UiState::Error(err.user_message());
                Err(err)
            }
        }
    }

    /// Runs one full submission against `service`.
    ///
    /// Resolves to `Ok(None)` when the call was ignored because a request is in flight.
    pub async fn submit<S>(
        &mut self,
        service: &S,
        raw_text: &str,
        raw_url: &str,
    ) -> Result<Option<&ResultView>, AnalysisError>
    where
        S: AnalysisService + ?Sized,
    {
        let Some(pending) = self.begin(raw_text, raw_url)? else {
            return Ok(None);
        };
        let outcome = service.analyze(&pending.request).await;
        self.finish(outcome)?;
        Ok(self.view.as_ref())
    }

    fn validate(&self, request: &AnalysisRequest) -> Result<(), AnalysisError> {
        if request.text.is_empty() {
            return Err(AnalysisError::Validation(
                "Please enter some text to analyze.".to_string(),
            ));
        }
        let min = self.config.min_text_chars;
        if request.text_chars() < min {
            return Err(AnalysisError::Validation(format!(
                "Please enter at least {min} characters for accurate analysis."
            )));
        }
        Ok(())
    }
}
