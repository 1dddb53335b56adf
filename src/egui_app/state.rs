//! Shared state types for the egui UI.

mod predict;
mod status;

pub use predict::*;
pub use status::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub predict: PredictViewState,
    pub service: ServiceStatus,
    /// Prediction endpoint shown in the header.
    pub endpoint: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            predict: PredictViewState::default(),
            service: ServiceStatus::default(),
            endpoint: String::new(),
        }
    }
}
