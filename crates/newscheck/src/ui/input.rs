use analysis_client::AnalysisService;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::app::{AppState, UiEvent};

/// Applies one key press. Returns true when the user confirmed quitting.
pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut AppState,
    service: &Arc<dyn AnalysisService>,
    ui_tx: &mpsc::Sender<UiEvent>,
) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if app.confirm_quit {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => return true,
            KeyCode::Esc => {
                app.confirm_quit = false;
                return false;
            }
            _ => {
                app.confirm_quit = false;
            }
        }
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => app.confirm_quit = true,
        KeyCode::Char('s') if ctrl => submit(app, service, ui_tx),
        KeyCode::Enter if ctrl => submit(app, service, ui_tx),
        KeyCode::F(5) => submit(app, service, ui_tx),
        KeyCode::Char('l') if ctrl => app.clear_input(),
        KeyCode::Char('e') if ctrl => app.fill_sample(),
        KeyCode::Char('u') if ctrl => app.clear_field(),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Esc => app.controller.dismiss_error(),
        KeyCode::PageDown => app.scroll_down(app.page_size()),
        KeyCode::PageUp => app.scroll_up(app.page_size()),
        KeyCode::Down if ctrl => app.scroll_down(1),
        KeyCode::Up if ctrl => app.scroll_up(1),
        KeyCode::Enter => app.insert_char('\n'),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(ch) if !ctrl => app.insert_char(ch),
        _ => {}
    }
    false
}

/// Hands the request to a background task; its outcome comes back as a [`UiEvent`].
fn submit(app: &mut AppState, service: &Arc<dyn AnalysisService>, ui_tx: &mpsc::Sender<UiEvent>) {
    let Some(pending) = app.begin_analysis() else {
        return;
    };
    let service = Arc::clone(service);
    let ui_tx = ui_tx.clone();
    tokio::spawn(async move {
        let outcome = service.analyze(&pending.request).await;
        if ui_tx.send(UiEvent::AnalysisFinished(outcome)).await.is_err() {
            tracing::warn!(
                event = "analysis.result.dropped",
                request_id = %pending.id,
                "ui loop closed before the result arrived"
            );
        }
    });
}

pub(crate) fn spawn_health_probe(
    service: &Arc<dyn AnalysisService>,
    ui_tx: &mpsc::Sender<UiEvent>,
) {
    let service = Arc::clone(service);
    let ui_tx = ui_tx.clone();
    tokio::spawn(async move {
        let status = service.health().await;
        if let Err(err) = &status {
            tracing::info!(event = "service.health.failed", error = %err);
        }
        let _ = ui_tx.send(UiEvent::Health(status)).await;
    });
}
