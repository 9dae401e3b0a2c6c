//! Client side of the text-analysis service: request lifecycle, HTTP
//! transport and the mapping from results to what the user sees.

pub mod controller;
pub mod error;
pub mod render;
pub mod service;

pub use controller::{AnalysisController, ControllerConfig, PendingAnalysis, UiState};
pub use error::AnalysisError;
pub use render::{render, ResultView, Tier, Tone};
pub use service::{AnalysisService, HttpAnalysisService};
