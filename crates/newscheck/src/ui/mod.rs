pub(crate) mod app;
mod format;
mod input;
mod render;
mod text;
mod theme;

pub(crate) use app::{AppState, UiEvent};
pub(crate) use format::plain_lines;
pub(crate) use input::{handle_key_event, spawn_health_probe};
pub(crate) use render::draw_ui;
