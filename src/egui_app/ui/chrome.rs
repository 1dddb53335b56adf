use eframe::egui::{self, Frame, Margin, RichText, StrokeKind};

use super::EguiApp;
use super::style;
use crate::egui_app::state::ServiceStatus;

impl EguiApp {
    pub(super) fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::outer_border())
                    .inner_margin(Margin::symmetric(8, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("AgriML Predict")
                            .strong()
                            .color(palette.accent_leaf),
                    );
                    ui.separator();
                    ui.label(
                        RichText::new(&self.controller.ui.endpoint).color(palette.text_muted),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let checking =
                            matches!(self.controller.ui.service, ServiceStatus::Checking);
                        if ui
                            .add_enabled(!checking, egui::Button::new("Check service"))
                            .clicked()
                        {
                            self.controller.check_service();
                        }
                        let service = &self.controller.ui.service;
                        let (label, color) = service_label(service);
                        let response = ui.label(RichText::new(label).color(color));
                        if let Some(detail) = service_detail(service) {
                            response.on_hover_text(detail);
                        }
                    });
                });
            });
    }

    pub(super) fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::outer_border())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(6.0);
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
                    ui.painter().rect_filled(badge_rect, 0.0, status.badge_color);
                    ui.painter().rect_stroke(
                        badge_rect,
                        0.0,
                        egui::Stroke::new(1.0, palette.panel_outline),
                        StrokeKind::Inside,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary))
                        .on_hover_text(status.log_text());
                });
            });
    }
}

fn service_label(status: &ServiceStatus) -> (String, egui::Color32) {
    let palette = style::palette();
    match status {
        ServiceStatus::Unknown => ("Service: unknown".into(), palette.text_muted),
        ServiceStatus::Checking => ("Service: checking…".into(), palette.text_muted),
        ServiceStatus::Online(health) => {
            let version = health
                .api_version
                .as_deref()
                .map(|version| format!(" (API {version})"))
                .unwrap_or_default();
            (format!("Service: online{version}"), palette.accent_leaf)
        }
        ServiceStatus::Offline(_) => ("Service: offline".into(), palette.warning),
    }
}

/// Hover text with the probe outcome, when there is one.
fn service_detail(status: &ServiceStatus) -> Option<String> {
    match status {
        ServiceStatus::Online(health) => Some(health.summary()),
        ServiceStatus::Offline(reason) => Some(format!("Last check failed: {reason}")),
        ServiceStatus::Unknown | ServiceStatus::Checking => None,
    }
}
