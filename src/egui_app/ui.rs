//! egui renderer for the prediction view.

mod chrome;
mod predict_panel;
pub mod style;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{self, AppSettings};
use crate::egui_app::controller::PredictController;
use crate::prediction::{HttpPredictionService, ServiceSetupError};
use eframe::egui::{self, TextureHandle};

/// Smallest window size the layout is designed for.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(520.0, 560.0);

const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: PredictController,
    visuals_set: bool,
    /// Preview texture tagged with the image generation it was built from.
    preview_tex: Option<(u64, TextureHandle)>,
    startup_probe_sent: bool,
}

impl EguiApp {
    /// Create the app, loading persisted configuration when available.
    pub fn new() -> Result<Self, String> {
        let settings_path = match config::config_path() {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::warn!("Settings will not be saved: {err}");
                None
            }
        };
        let settings = match settings_path.as_deref() {
            Some(path) => config::load_from_path(path).unwrap_or_else(|err| {
                tracing::warn!("Failed to load config, using defaults: {err}");
                AppSettings::default()
            }),
            None => AppSettings::default(),
        };
        tracing::info!("Prediction service at {}", settings.service.base_url);
        let service = HttpPredictionService::new(settings.service.clone())
            .map_err(|err| launch_error(err, settings_path.as_deref()))?;
        let mut controller = PredictController::new(Arc::new(service), settings);
        if let Some(path) = settings_path {
            controller = controller.with_settings_path(path);
        }
        Ok(Self::with_controller(controller))
    }

    /// Wrap an existing controller, e.g. one wired to a custom service.
    pub fn with_controller(controller: PredictController) -> Self {
        Self {
            controller,
            visuals_set: false,
            preview_tex: None,
            startup_probe_sent: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        if !self.startup_probe_sent {
            self.startup_probe_sent = true;
            self.controller.check_service();
        }
        self.controller.poll_jobs();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(style::palette().bg_secondary)
                    .inner_margin(egui::Margin::same(12)),
            )
            .show(ctx, |ui| self.render_predict_panel(ui));
        if self.controller.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }
    }
}

fn launch_error(err: ServiceSetupError, settings_path: Option<&Path>) -> String {
    match settings_path {
        Some(path) => format!("{err}\nCheck [service] in {}", path.display()),
        None => err.to_string(),
    }
}
