use std::path::Path;
use std::sync::Arc;

use rfd::FileDialog;

use super::PredictController;
use super::jobs::PredictionJobResult;
use crate::egui_app::state::{PredictionResult, SelectedImage};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model;
use crate::prediction::{ModelKind, PredictRequest};

pub const NO_IMAGE_WARNING: &str = "Please select an image first";
pub const BUSY_WARNING: &str = "A prediction is already running";
pub const GENERIC_FAILURE_MESSAGE: &str = "Prediction failed. Please try again.";

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

impl PredictController {
    pub fn select_model(&mut self, model: ModelKind) {
        self.ui.predict.model = model;
        if self.settings.view.last_model != model {
            self.settings.view.last_model = model;
            self.persist_settings();
        }
    }

    /// Make `image` the upload candidate and reset any previous outcome.
    pub fn select_image(&mut self, image: SelectedImage) {
        let predict = &mut self.ui.predict;
        predict.image_generation = predict.image_generation.wrapping_add(1);
        predict.result = PredictionResult::NotRequested;
        predict.warning = None;
        self.jobs.forget_active_prediction();
        let note = if image.preview.is_some() {
            format!("Selected {} ({})", image.file_name, image.size_label())
        } else {
            format!(
                "Selected {} ({}); no preview available",
                image.file_name,
                image.size_label()
            )
        };
        tracing::info!("{note}");
        self.ui.predict.image = Some(image);
        self.set_status(note, StatusTone::Info);
    }

    /// Read `path` and select it; on failure the current selection stays.
    pub fn select_image_from_path(&mut self, path: &Path) {
        match SelectedImage::from_path(path) {
            Ok(image) => self.select_image(image),
            Err(err) => {
                tracing::warn!("Image selection failed: {err}");
                let message = err.to_string();
                self.ui.predict.warning = Some(message.clone());
                self.set_status(message, StatusTone::Warning);
            }
        }
    }

    pub fn select_image_via_dialog(&mut self) {
        let picked = FileDialog::new()
            .set_title("Choose an image")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file();
        if let Some(path) = picked {
            self.select_image_from_path(&path);
        }
    }

    /// Upload the selected image with the selected model in the background.
    pub fn submit(&mut self) {
        if self.jobs.prediction_in_flight() {
            self.ui.predict.warning = Some(BUSY_WARNING.to_string());
            self.set_status(BUSY_WARNING, StatusTone::Warning);
            return;
        }
        let Some(image) = self.ui.predict.image.as_ref() else {
            self.ui.predict.warning = Some(NO_IMAGE_WARNING.to_string());
            self.set_status(NO_IMAGE_WARNING, StatusTone::Warning);
            return;
        };
        let request = PredictRequest {
            model: self.ui.predict.model,
            file_name: image.file_name.clone(),
            bytes: Arc::clone(&image.bytes),
        };
        let status = format!("Running {} model on {}", request.model.label(), request.file_name);
        self.ui.predict.warning = None;
        self.ui.predict.result = PredictionResult::InFlight;
        let request_id = self
            .jobs
            .begin_prediction(Arc::clone(&self.service), request);
        tracing::info!("Prediction request {request_id} started");
        self.set_status(status, StatusTone::Busy);
    }

    pub(super) fn handle_prediction_result(&mut self, message: PredictionJobResult) {
        if !self.jobs.finish_prediction(message.request_id) {
            tracing::debug!("Dropping stale prediction response {}", message.request_id);
            return;
        }
        match message.result {
            Ok(payload) => {
                let summary = format!(
                    "{}: {} ({})",
                    message.model.label(),
                    payload.prediction,
                    view_model::format_confidence(payload.confidence)
                );
                self.ui.predict.result = PredictionResult::Succeeded(payload);
                self.set_status(summary, StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!(
                    "Prediction request {} ({}) failed: {err}",
                    message.request_id,
                    message.model
                );
                self.ui.predict.result =
                    PredictionResult::Failed(GENERIC_FAILURE_MESSAGE.to_string());
                self.set_status(GENERIC_FAILURE_MESSAGE, StatusTone::Error);
            }
        }
    }
}
