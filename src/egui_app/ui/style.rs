use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub grid_soft: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_leaf: Color32,
    pub accent_ice: Color32,
    pub warning: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(10, 12, 10),
        bg_secondary: Color32::from_rgb(24, 28, 24),
        bg_tertiary: Color32::from_rgb(40, 46, 40),
        panel_outline: Color32::from_rgb(38, 46, 40),
        grid_soft: Color32::from_rgb(30, 34, 30),
        text_primary: Color32::from_rgb(190, 200, 188),
        text_muted: Color32::from_rgb(140, 150, 140),
        accent_leaf: Color32::from_rgb(126, 200, 110),
        accent_ice: Color32::from_rgb(167, 217, 255),
        warning: Color32::from_rgb(200, 128, 96),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent_ice;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.bg_fill = palette.grid_soft;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_leaf);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rectilinear(&mut visuals.widgets.inactive, palette);
    set_rectilinear(&mut visuals.widgets.hovered, palette);
    set_rectilinear(&mut visuals.widgets.active, palette);
    set_rectilinear(&mut visuals.widgets.open, palette);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

fn set_rectilinear(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.grid_soft;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn outer_border() -> Stroke {
    Stroke::new(2.0, palette().panel_outline)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

/// Badge label and color for a status tone.
pub fn status_badge(tone: StatusTone) -> (String, Color32) {
    let label = match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Working",
        StatusTone::Info => "Info",
        StatusTone::Warning => "Warning",
        StatusTone::Error => "Error",
    };
    (label.into(), status_badge_color(tone))
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_rgb(42, 42, 42),
        StatusTone::Busy => Color32::from_rgb(31, 139, 255),
        StatusTone::Info => Color32::from_rgb(64, 140, 112),
        StatusTone::Warning => Color32::from_rgb(192, 138, 43),
        StatusTone::Error => Color32::from_rgb(192, 57, 43),
    }
}
