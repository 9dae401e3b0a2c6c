use analysis_client::UiState;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Paragraph, Wrap};

use super::app::{AppState, Focus, HealthView};
use super::format::format_result_view;
use super::text::truncate_with_ellipsis;
use super::theme::{Theme, ValueStyle};

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(30),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header_block = theme.block("Service");
    let header_width = header_block.inner(chunks[0]).width as usize;
    let health = health_spans(&theme, &app.health);
    let health_width: usize = health.iter().map(|span| span.width()).sum();
    let url_width = header_width.saturating_sub(health_width + 2);
    let mut header_spans = vec![Span::styled(
        truncate_with_ellipsis(&app.service_url, url_width),
        theme.value_style(ValueStyle::Important),
    )];
    header_spans.push(Span::raw("  "));
    header_spans.extend(health);
    let header = Paragraph::new(Line::from(header_spans)).block(header_block);
    frame.render_widget(header, chunks[0]);

    let text_title = format!(
        "Article text ({} chars, min {})",
        app.char_count(),
        app.controller.min_text_chars()
    );
    let text_input = Paragraph::new(app.text.as_str())
        .block(theme.focused_block(text_title, app.focus == Focus::Text))
        .style(theme.value_style(ValueStyle::Normal))
        .wrap(Wrap { trim: false });
    frame.render_widget(text_input, chunks[1]);

    let url_input = Paragraph::new(app.url.as_str())
        .block(theme.focused_block("Source URL (optional)", app.focus == Focus::Url))
        .style(theme.value_style(ValueStyle::Normal));
    frame.render_widget(url_input, chunks[2]);

    let status = match app.controller.state() {
        UiState::Idle => Line::styled(
            "Ready. Ctrl+S to analyze.",
            theme.value_style(ValueStyle::Dim),
        ),
        UiState::Busy => Line::styled("Analyzing...", theme.warn_style()),
        UiState::Error(message) => Line::from(vec![
            Span::styled(message.clone(), theme.error_style()),
            Span::styled("  (Esc to dismiss)", theme.help_style()),
        ]),
    };
    frame.render_widget(Paragraph::new(status).block(theme.block("Status")), chunks[3]);

    let result_block = theme.block("Result");
    let result_inner = result_block.inner(chunks[4]);
    let result_text = match (app.controller.view(), app.controller.state()) {
        (Some(view), _) => format_result_view(&theme, view, result_inner.width),
        (None, UiState::Busy) => {
            Text::styled("waiting for the analysis service...", theme.help_style())
        }
        (None, _) => Text::styled("no analysis yet", theme.help_style()),
    };
    app.set_result_metrics(result_text.lines.len(), result_inner.height);
    let result_widget = Paragraph::new(result_text)
        .block(result_block)
        .scroll((app.result_scroll as u16, 0));
    frame.render_widget(Clear, chunks[4]);
    frame.render_widget(result_widget, chunks[4]);

    let trigger_hint = if app.controller.trigger_enabled() {
        "Ctrl+S/F5=analyze  "
    } else {
        "(analyzing)  "
    };
    let mut footer_spans = vec![
        Span::styled(trigger_hint, theme.help_style()),
        Span::styled(
            "Tab=field  Ctrl+E=sample  Ctrl+U=clear field  Ctrl+L=clear all  PgUp/PgDn=scroll  \
             Ctrl+Q=quit  ",
            theme.help_style(),
        ),
    ];
    if app.confirm_quit {
        footer_spans.push(Span::styled(
            "press Ctrl+Q again to quit / Esc to cancel",
            theme.warn_style(),
        ));
    }
    let footer = Paragraph::new(Line::from(footer_spans)).block(theme.block("Controls"));
    frame.render_widget(footer, chunks[5]);
}

fn health_spans(theme: &Theme, health: &HealthView) -> Vec<Span<'static>> {
    match health {
        HealthView::Unknown => vec![Span::styled("checking...", theme.help_style())],
        HealthView::Healthy { ai_model_available } => vec![
            Span::styled("healthy", theme.accent_style()),
            Span::styled(
                if *ai_model_available {
                    "  AI model loaded"
                } else {
                    "  rule-based only"
                },
                theme.key_style(),
            ),
        ],
        HealthView::Unreachable(message) => {
            vec![Span::styled(format!("unreachable: {message}"), theme.warn_style())]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_client::ControllerConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> AppState {
        AppState::new(
            "http://127.0.0.1:5000/analyze".to_string(),
            ControllerConfig::default(),
        )
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn draws_idle_form() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
        let mut app = app();
        app.text = "hello".to_string();
        terminal.draw(|frame| draw_ui(frame, &mut app)).expect("draw");
        let screen = screen_text(&terminal);
        assert!(screen.contains("Article text (5 chars, min 10)"));
        assert!(screen.contains("no analysis yet"));
        assert!(screen.contains("Ready."));
    }

    #[test]
    fn draws_error_banner() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
        let mut app = app();
        app.text = "short".to_string();
        assert!(app.begin_analysis().is_none());
        terminal.draw(|frame| draw_ui(frame, &mut app)).expect("draw");
        let screen = screen_text(&terminal);
        assert!(screen.contains("Please enter at least 10 characters"));
    }
}
