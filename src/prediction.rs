//! Client side of the remote inference service.
//!
//! The service classifies one uploaded image with one of three models and
//! answers with a JSON payload whose optional fields depend on the model.

mod model_kind;
mod payload;
mod service;

pub use model_kind::ModelKind;
pub use payload::{PredictionPayload, ServiceHealth, SoilComposition};
pub use service::{
    HttpPredictionService, PredictError, PredictRequest, PredictionService, ServiceSetupError,
};
