use serde::{Deserialize, Serialize};

/// Successful response of `POST /predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionPayload {
    /// Predicted class name.
    pub prediction: String,
    /// Probability of the predicted class, in `[0, 1]`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Model the service actually ran, echoed back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Soil only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<SoilComposition>,
    /// Plant only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,
    /// Pest only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
}

/// Soil composition percentages.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoilComposition {
    pub clay: f64,
    pub sand: f64,
    pub silt: f64,
}

/// Response of `GET /` on the prediction service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub models_loaded: Vec<String>,
    #[serde(default)]
    pub api_version: Option<String>,
}

impl ServiceHealth {
    /// One-line description for the status bar.
    pub fn summary(&self) -> String {
        let mut text = format!("Service {}", self.status);
        if let Some(version) = self.api_version.as_deref() {
            text.push_str(&format!(" (API {version})"));
        }
        if !self.models_loaded.is_empty() {
            text.push_str(&format!("; models: {}", self.models_loaded.join(", ")));
        }
        text
    }
}
