use crate::egui_app::ui::style::{self, StatusTone};
use egui::Color32;

/// Maximum number of status messages kept in the rolling log.
const STATUS_LOG_LIMIT: usize = 50;

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    /// Rolling status log entries, oldest first.
    pub log: Vec<String>,
}

impl StatusBarState {
    /// Status shown before anything has been selected.
    pub fn idle() -> Self {
        let (badge_label, badge_color) = style::status_badge(StatusTone::Idle);
        Self {
            text: "Choose a model and an image to get started".into(),
            badge_label,
            badge_color,
            log: Vec::new(),
        }
    }

    /// Replace the current message and append it to the log.
    pub fn set(&mut self, text: String, tone: StatusTone) {
        let (badge_label, badge_color) = style::status_badge(tone);
        self.badge_label = badge_label;
        self.badge_color = badge_color;
        self.log.push(text.clone());
        if self.log.len() > STATUS_LOG_LIMIT {
            let excess = self.log.len() - STATUS_LOG_LIMIT;
            self.log.drain(..excess);
        }
        self.text = text;
    }

    /// Concatenate log entries into a single displayable string.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_bounded() {
        let mut status = StatusBarState::idle();
        for idx in 0..(STATUS_LOG_LIMIT + 5) {
            status.set(format!("message {idx}"), StatusTone::Info);
        }
        assert_eq!(status.log.len(), STATUS_LOG_LIMIT);
        assert_eq!(status.log.first().map(String::as_str), Some("message 5"));
        assert_eq!(status.text, format!("message {}", STATUS_LOG_LIMIT + 4));
        assert_eq!(status.badge_label, "Info");
    }
}
