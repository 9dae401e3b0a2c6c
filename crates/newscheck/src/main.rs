mod cli;
mod config;
mod headless;
mod terminal;
mod ui;

use crate::cli::Args;
use crate::config::{apply_base_url, load_client_config};
use crate::headless::{run_headless, run_health};
use crate::terminal::{init_tracing, restore_terminal, setup_terminal};
use crate::ui::{draw_ui, handle_key_event, spawn_health_probe, AppState, UiEvent};
use analysis_client::{AnalysisService, ControllerConfig, HttpAnalysisService};
use clap::Parser;
use crossterm::event::{self, Event};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _file_guard = init_tracing(&args.log_dir, args.log_to_stderr)?;

    let mut config = load_client_config(args.config.as_ref(), args.predict)?;
    apply_base_url(&mut config, args.base_url.as_deref())?;
    let controller_config = ControllerConfig {
        min_text_chars: config.min_text_chars,
    };

    let http = HttpAnalysisService::new(config.clone())
        .map_err(|err| anyhow::anyhow!("failed to build http client: {err}"))?;
    let service_url = http.analyze_url().to_string();
    tracing::info!(
        event = "client.ready",
        url = %service_url,
        schema = ?config.schema,
        timeout = %humantime::format_duration(config.request_timeout),
    );
    let service: Arc<dyn AnalysisService> = Arc::new(http);

    if args.health {
        return run_health(service.as_ref(), &mut std::io::stdout()).await;
    }
    if let Some(text) = args.text.as_deref() {
        let url = args.url.as_deref().unwrap_or_default();
        return run_headless(
            service.as_ref(),
            controller_config,
            text,
            url,
            &mut std::io::stdout(),
        )
        .await;
    }

    let (ui_tx, mut ui_rx) = mpsc::channel::<UiEvent>(16);
    spawn_health_probe(&service, &ui_tx);

    let mut terminal = setup_terminal()?;
    let mut app = AppState::new(service_url, controller_config);

    let tick_rate = Duration::from_millis(100);
    loop {
        while let Ok(event) = ui_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(key, &mut app, &service, &ui_tx) {
                    break;
                }
            }
        }
    }

    restore_terminal(&mut terminal)?;
    Ok(())
}
