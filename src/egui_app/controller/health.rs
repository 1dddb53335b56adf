use std::sync::Arc;

use super::PredictController;
use super::jobs::HealthCheckResult;
use crate::egui_app::state::ServiceStatus;
use crate::egui_app::ui::style::StatusTone;

impl PredictController {
    /// Probe the service root in the background; ignored while a probe is running.
    pub fn check_service(&mut self) {
        if self.jobs.health_check_in_progress() {
            return;
        }
        self.ui.service = ServiceStatus::Checking;
        self.jobs.begin_health_check(Arc::clone(&self.service));
        let text = format!("Checking {}", self.settings.service.base_url);
        self.set_status(text, StatusTone::Busy);
    }

    pub(super) fn handle_health_result(&mut self, message: HealthCheckResult) {
        self.jobs.clear_health_check();
        match message.result {
            Ok(health) => {
                let summary = health.summary();
                tracing::info!("{summary}");
                self.ui.service = ServiceStatus::Online(health);
                self.set_status(summary, StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!("Service check failed: {err}");
                let text = format!("Service unreachable: {err}");
                self.ui.service = ServiceStatus::Offline(err.to_string());
                self.set_status(text, StatusTone::Error);
            }
        }
    }
}
