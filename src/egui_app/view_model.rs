//! Helpers to convert prediction state into egui-facing view structs.

use crate::egui_app::state::PredictionResult;
use crate::prediction::PredictionPayload;

/// What the result panel should show.
#[derive(Clone, Debug, PartialEq)]
pub enum ResultView {
    /// Nothing submitted since the last image selection.
    Empty,
    Loading,
    Failed(String),
    Lines(Vec<ResultLine>),
}

/// One `label: value` row of a successful prediction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultLine {
    pub label: &'static str,
    pub value: String,
}

impl ResultLine {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

pub fn result_view(result: &PredictionResult) -> ResultView {
    match result {
        PredictionResult::NotRequested => ResultView::Empty,
        PredictionResult::InFlight => ResultView::Loading,
        PredictionResult::Failed(message) => ResultView::Failed(message.clone()),
        PredictionResult::Succeeded(payload) => ResultView::Lines(payload_lines(payload)),
    }
}

/// Rows for a payload; model-specific rows appear only when the service sent them.
pub fn payload_lines(payload: &PredictionPayload) -> Vec<ResultLine> {
    let mut lines = vec![
        ResultLine::new("Prediction", payload.prediction.clone()),
        ResultLine::new("Confidence", format_confidence(payload.confidence)),
    ];
    if let Some(composition) = payload.composition {
        lines.push(ResultLine::new("Clay", format_percentage(composition.clay)));
        lines.push(ResultLine::new("Sand", format_percentage(composition.sand)));
        lines.push(ResultLine::new("Silt", format_percentage(composition.silt)));
    }
    if let Some(treatment) = payload.treatment.as_deref() {
        lines.push(ResultLine::new("Treatment", treatment));
    }
    if let Some(risk) = payload.risk_level.as_deref() {
        lines.push(ResultLine::new("Risk level", risk));
    }
    lines
}

/// Confidence in `[0, 1]` as a percentage with two decimals, e.g. `"87.00%"`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

/// Composition values already arrive as percentages.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::SoilComposition;

    fn payload(prediction: &str, confidence: f64) -> PredictionPayload {
        PredictionPayload {
            prediction: prediction.into(),
            confidence,
            status: None,
            model: None,
            composition: None,
            treatment: None,
            risk_level: None,
        }
    }

    fn value<'a>(lines: &'a [ResultLine], label: &str) -> Option<&'a str> {
        lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }

    #[test]
    fn confidence_has_two_decimals() {
        assert_eq!(format_confidence(0.87), "87.00%");
        assert_eq!(format_confidence(1.0), "100.00%");
        assert_eq!(format_confidence(0.12345), "12.35%");
    }

    #[test]
    fn soil_payload_lists_composition() {
        let mut soil = payload("Loam", 0.9);
        soil.composition = Some(SoilComposition {
            clay: 20.0,
            sand: 45.5,
            silt: 34.5,
        });
        let lines = payload_lines(&soil);
        assert_eq!(value(&lines, "Prediction"), Some("Loam"));
        assert_eq!(value(&lines, "Confidence"), Some("90.00%"));
        assert_eq!(value(&lines, "Clay"), Some("20.0%"));
        assert_eq!(value(&lines, "Sand"), Some("45.5%"));
        assert_eq!(value(&lines, "Silt"), Some("34.5%"));
        assert_eq!(value(&lines, "Treatment"), None);
    }

    #[test]
    fn pest_payload_lists_risk_level() {
        let mut pest = payload("Aphids", 0.83);
        pest.risk_level = Some("High".into());
        let lines = payload_lines(&pest);
        assert_eq!(lines.len(), 3);
        assert_eq!(value(&lines, "Risk level"), Some("High"));
    }

    #[test]
    fn lifecycle_states_map_to_views() {
        assert_eq!(result_view(&PredictionResult::NotRequested), ResultView::Empty);
        assert_eq!(result_view(&PredictionResult::InFlight), ResultView::Loading);
        assert_eq!(
            result_view(&PredictionResult::Failed("nope".into())),
            ResultView::Failed("nope".into())
        );
    }
}
