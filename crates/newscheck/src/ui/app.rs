use analysis_client::{AnalysisController, AnalysisError, ControllerConfig, PendingAnalysis};
use protocol::{AnalysisResult, HealthStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Focus {
    #[default]
    Text,
    Url,
}

#[derive(Clone, Default, PartialEq, Eq)]
pub(crate) enum HealthView {
    #[default]
    Unknown,
    Healthy {
        ai_model_available: bool,
    },
    Unreachable(String),
}

/// Built-in articles for trying the service without pasting text.
pub(crate) const SAMPLE_ARTICLES: &[&str] = &[
    "SHOCKING!!! Doctors HATE this one simple trick that cures everything overnight! \
     The government doesn't want you to know the truth. Share before it gets deleted!!!",
    "The central bank held interest rates steady on Wednesday, citing easing inflation \
     and a stable labour market, according to a statement released after the meeting.",
    "Scientists at a European research institute published a peer-reviewed study on \
     Tuesday describing a new method for recycling lithium from used batteries.",
    "You won't BELIEVE what celebrities are hiding! Insiders say a secret cabal controls \
     the weather and the media refuses to report it!!",
];

/// Completions delivered back to the UI loop.
pub(crate) enum UiEvent {
    AnalysisFinished(Result<AnalysisResult, AnalysisError>),
    Health(Result<HealthStatus, AnalysisError>),
}

pub(crate) struct AppState {
    pub(crate) service_url: String,
    pub(crate) controller: AnalysisController,
    pub(crate) text: String,
    pub(crate) url: String,
    pub(crate) focus: Focus,
    pub(crate) health: HealthView,
    pub(crate) result_scroll: usize,
    pub(crate) result_max_scroll: usize,
    pub(crate) result_view_height: u16,
    pub(crate) confirm_quit: bool,
    next_sample: usize,
}

impl AppState {
    pub(crate) fn new(service_url: String, config: ControllerConfig) -> Self {
        Self {
            service_url,
            controller: AnalysisController::new(config),
            text: String::new(),
            url: String::new(),
            focus: Focus::default(),
            health: HealthView::default(),
            result_scroll: 0,
            result_max_scroll: 0,
            result_view_height: 0,
            confirm_quit: false,
            next_sample: 0,
        }
    }

    pub(crate) fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::AnalysisFinished(outcome) => {
                // The controller already records the failure in its state.
                let _ = self.controller.finish(outcome);
                self.result_scroll = 0;
            }
            UiEvent::Health(Ok(status)) => {
                self.health = HealthView::Healthy {
                    ai_model_available: status.ai_model_available,
                };
            }
            UiEvent::Health(Err(err)) => {
                self.health = HealthView::Unreachable(err.user_message());
            }
        }
    }

    /// Starts an analysis of the current input, if the controller allows one.
    pub(crate) fn begin_analysis(&mut self) -> Option<PendingAnalysis> {
        self.controller.begin(&self.text, &self.url).ok().flatten()
    }

    pub(crate) fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Text => Focus::Url,
            Focus::Url => Focus::Text,
        };
    }

    pub(crate) fn focused_field(&mut self) -> &mut String {
        match self.focus {
            Focus::Text => &mut self.text,
            Focus::Url => &mut self.url,
        }
    }

    pub(crate) fn insert_char(&mut self, ch: char) {
        if ch == '\n' && self.focus == Focus::Url {
            return;
        }
        self.focused_field().push(ch);
    }

    pub(crate) fn delete_char(&mut self) {
        self.focused_field().pop();
    }

    pub(crate) fn clear_field(&mut self) {
        self.focused_field().clear();
    }

    pub(crate) fn clear_input(&mut self) {
        self.text.clear();
        self.url.clear();
        self.focus = Focus::Text;
        self.controller.dismiss_error();
    }

    /// Replaces the article text with the next built-in sample, cycling.
    pub(crate) fn fill_sample(&mut self) {
        let Some(sample) = SAMPLE_ARTICLES.get(self.next_sample % SAMPLE_ARTICLES.len()) else {
            return;
        };
        self.text = (*sample).to_string();
        self.focus = Focus::Text;
        self.next_sample = (self.next_sample + 1) % SAMPLE_ARTICLES.len();
        self.controller.dismiss_error();
    }

    pub(crate) fn set_result_metrics(&mut self, total_lines: usize, view_height: u16) {
        let total_lines = total_lines.max(1);
        self.result_view_height = view_height;
        self.result_max_scroll = total_lines.saturating_sub(view_height as usize);
        if self.result_scroll > self.result_max_scroll {
            self.result_scroll = self.result_max_scroll;
        }
    }

    pub(crate) fn scroll_down(&mut self, lines: usize) {
        self.result_scroll = (self.result_scroll + lines).min(self.result_max_scroll);
    }

    pub(crate) fn scroll_up(&mut self, lines: usize) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    pub(crate) fn page_size(&self) -> usize {
        let height = self.result_view_height.max(1) as usize;
        height.saturating_sub(1).max(1)
    }
}
