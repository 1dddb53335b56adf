use eframe::egui::{self, ColorImage, RichText, TextureOptions};

use super::EguiApp;
use super::style;
use crate::egui_app::state::PreviewImage;
use crate::egui_app::view_model::{self, ResultView};
use crate::prediction::ModelKind;

const PREVIEW_DISPLAY_EDGE: f32 = 320.0;

impl EguiApp {
    pub(super) fn render_predict_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        egui::ScrollArea::vertical()
            .id_salt("predict_scroll")
            .show(ui, |ui| {
                ui.label(RichText::new("Model").color(palette.text_muted));
                ui.horizontal(|ui| {
                    let current = self.controller.ui.predict.model;
                    for kind in ModelKind::ALL {
                        if ui.selectable_label(current == kind, kind.label()).clicked() {
                            self.controller.select_model(kind);
                        }
                    }
                });
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Choose image…").clicked() {
                        self.controller.select_image_via_dialog();
                    }
                    match self.controller.ui.predict.image.as_ref() {
                        Some(image) => {
                            ui.label(
                                RichText::new(format!(
                                    "{} ({})",
                                    image.file_name,
                                    image.size_label()
                                ))
                                .color(palette.text_primary),
                            );
                        }
                        None => {
                            ui.label(RichText::new("No image selected").color(palette.text_muted));
                        }
                    }
                });
                ui.add_space(6.0);
                self.render_preview(ui);
                ui.add_space(10.0);

                let in_flight = self.controller.ui.predict.result.is_in_flight();
                if ui
                    .add_enabled(!in_flight, egui::Button::new("Predict"))
                    .clicked()
                {
                    self.controller.submit();
                }
                if let Some(warning) = self.controller.ui.predict.warning.as_deref() {
                    ui.label(RichText::new(warning).color(palette.warning));
                }
                ui.add_space(10.0);
                ui.separator();
                render_result(ui, &view_model::result_view(&self.controller.ui.predict.result));
            });
    }

    fn render_preview(&mut self, ui: &mut egui::Ui) {
        let predict = &self.controller.ui.predict;
        let Some(preview) = predict.image.as_ref().and_then(|image| image.preview.as_ref()) else {
            self.preview_tex = None;
            return;
        };
        let generation = predict.image_generation;
        let stale = self
            .preview_tex
            .as_ref()
            .is_none_or(|(built_for, _)| *built_for != generation);
        if stale {
            let texture = ui.ctx().load_texture(
                "image_preview",
                color_image(preview),
                TextureOptions::LINEAR,
            );
            self.preview_tex = Some((generation, texture));
        }
        if let Some((_, texture)) = &self.preview_tex {
            let size = fit_within(texture.size_vec2(), PREVIEW_DISPLAY_EDGE);
            ui.add(egui::Image::new((texture.id(), size)));
        }
    }
}

fn render_result(ui: &mut egui::Ui, view: &ResultView) {
    let palette = style::palette();
    match view {
        ResultView::Empty => {
            ui.label(RichText::new("Submit an image to see a prediction").color(palette.text_muted));
        }
        ResultView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Waiting for the service…").color(palette.text_muted));
            });
        }
        ResultView::Failed(message) => {
            ui.label(RichText::new(message).color(palette.warning));
        }
        ResultView::Lines(lines) => {
            egui::Grid::new("prediction_result")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    for line in lines {
                        ui.label(RichText::new(line.label).color(palette.text_muted));
                        ui.label(RichText::new(&line.value).color(palette.text_primary));
                        ui.end_row();
                    }
                });
        }
    }
}

fn color_image(preview: &PreviewImage) -> ColorImage {
    ColorImage::from_rgba_unmultiplied(
        [preview.width as usize, preview.height as usize],
        &preview.rgba,
    )
}

fn fit_within(size: egui::Vec2, max_edge: f32) -> egui::Vec2 {
    let longest = size.x.max(size.y);
    if longest <= max_edge || longest <= 0.0 {
        size
    } else {
        size * (max_edge / longest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_within_scales_longest_edge() {
        let fitted = fit_within(egui::vec2(640.0, 320.0), 320.0);
        assert_eq!(fitted, egui::vec2(320.0, 160.0));
        let small = fit_within(egui::vec2(100.0, 50.0), 320.0);
        assert_eq!(small, egui::vec2(100.0, 50.0));
    }
}
