//! Bridges the prediction service and settings to the egui UI state.

mod health;
mod jobs;
mod predict;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{self, AppSettings};
use crate::egui_app::state::UiState;
use crate::egui_app::ui::style::StatusTone;
use crate::prediction::PredictionService;
use jobs::{ControllerJobs, JobMessage};

pub use predict::{BUSY_WARNING, GENERIC_FAILURE_MESSAGE, NO_IMAGE_WARNING};

/// Maintains view state and runs service calls off the UI thread.
pub struct PredictController {
    pub ui: UiState,
    service: Arc<dyn PredictionService>,
    settings: AppSettings,
    settings_path: Option<PathBuf>,
    jobs: ControllerJobs,
}

impl PredictController {
    pub fn new(service: Arc<dyn PredictionService>, settings: AppSettings) -> Self {
        let mut ui = UiState::default();
        ui.predict.model = settings.view.last_model;
        ui.endpoint = settings.service.endpoint("/predict");
        Self {
            ui,
            service,
            settings,
            settings_path: None,
            jobs: ControllerJobs::new(),
        }
    }

    /// Persist view choices (such as the last model) to `path`.
    pub fn with_settings_path(mut self, path: PathBuf) -> Self {
        self.settings_path = Some(path);
        self
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// True while a prediction or health probe is outstanding.
    pub fn is_busy(&self) -> bool {
        self.jobs.prediction_in_flight() || self.jobs.health_check_in_progress()
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text.into(), tone);
    }

    /// Drain finished background jobs into the UI state.
    pub fn poll_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::PredictionFinished(result) => self.handle_prediction_result(result),
                JobMessage::HealthChecked(result) => self.handle_health_result(result),
            }
        }
    }

    fn persist_settings(&mut self) {
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(err) = config::save_to_path(&self.settings, path) {
            tracing::warn!("Failed to save settings: {err}");
            self.set_status(format!("Failed to save settings: {err}"), StatusTone::Warning);
        }
    }
}
