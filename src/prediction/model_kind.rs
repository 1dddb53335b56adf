use std::fmt;

use serde::{Deserialize, Serialize};

/// Which of the remote inference tasks a request targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    #[default]
    Soil,
    Plant,
    Pest,
}

impl ModelKind {
    /// All kinds, in the order they are offered to the user.
    pub const ALL: [ModelKind; 3] = [ModelKind::Soil, ModelKind::Plant, ModelKind::Pest];

    /// Value sent as the `model_type` form field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Soil => "soil",
            Self::Plant => "plant",
            Self::Pest => "pest",
        }
    }

    /// Human-readable label for the selector.
    pub fn label(self) -> &'static str {
        match self {
            Self::Soil => "Soil type",
            Self::Plant => "Plant disease",
            Self::Pest => "Pest",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
