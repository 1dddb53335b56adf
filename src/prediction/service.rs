use std::sync::Arc;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::ACCEPT;

use super::ModelKind;
use super::payload::{PredictionPayload, ServiceHealth};
use crate::config::ServiceSettings;
use crate::http_client;

/// One image classification request.
#[derive(Clone, Debug)]
pub struct PredictRequest {
    pub model: ModelKind,
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

/// Reasons a call to the prediction service can fail.
///
/// The view shows one generic message for all of them; the variants exist for
/// logging.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("Failed to read response: {0}")]
    Body(String),
    #[error("Invalid JSON response: {0}")]
    Json(String),
}

/// Reasons the HTTP service cannot be set up from the configured settings.
#[derive(Debug, thiserror::Error)]
pub enum ServiceSetupError {
    #[error("Invalid service URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// The remote inference backend.
pub trait PredictionService: Send + Sync {
    /// Upload one image and return the parsed success payload.
    fn predict(&self, request: &PredictRequest) -> Result<PredictionPayload, PredictError>;

    /// Probe the service root.
    fn health(&self) -> Result<ServiceHealth, PredictError>;
}

/// [`PredictionService`] over HTTP.
///
/// The upload goes through a `reqwest` multipart form; the health probe uses
/// the shared `ureq` agent.
pub struct HttpPredictionService {
    agent: ureq::Agent,
    upload: reqwest::blocking::Client,
    settings: ServiceSettings,
}

impl HttpPredictionService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceSetupError> {
        validate_base_url(&settings.base_url)?;
        Ok(Self {
            agent: http_client::build_agent(&settings),
            upload: http_client::build_upload_client(&settings)?,
            settings,
        })
    }

    fn read_body(&self, response: ureq::Response) -> Result<String, PredictError> {
        http_client::read_response_text(response, self.settings.max_response_bytes)
            .map_err(|err| PredictError::Body(err.to_string()))
    }

    fn map_call_error(&self, err: ureq::Error) -> PredictError {
        match err {
            ureq::Error::Status(code, response) => {
                let body = self.read_body(response).unwrap_or_else(|err| err.to_string());
                PredictError::Status { code, body }
            }
            ureq::Error::Transport(err) => PredictError::Transport(err.to_string()),
        }
    }

    fn upload_form(request: &PredictRequest) -> Result<Form, PredictError> {
        let file = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(content_type_for(&request.file_name))
            .map_err(|err| PredictError::Transport(err.to_string()))?;
        Ok(Form::new()
            .text("model_type", request.model.as_str())
            .part("file", file))
    }
}

impl PredictionService for HttpPredictionService {
    fn predict(&self, request: &PredictRequest) -> Result<PredictionPayload, PredictError> {
        let url = self.settings.endpoint("/predict");
        tracing::debug!(
            "POST {url} model={} file={} ({} bytes)",
            request.model,
            request.file_name,
            request.bytes.len()
        );
        let response = self
            .upload
            .post(&url)
            .header(ACCEPT, "application/json")
            .multipart(Self::upload_form(request)?)
            .send()
            .map_err(|err| PredictError::Transport(err.to_string()))?;
        let status = response.status();
        let body = http_client::read_upload_text(response, self.settings.max_response_bytes)
            .map_err(|err| PredictError::Body(err.to_string()));
        if !status.is_success() {
            return Err(PredictError::Status {
                code: status.as_u16(),
                body: body.unwrap_or_else(|err| err.to_string()),
            });
        }
        let payload = parse_payload(&body?)?;
        if let Some(model) = payload.model.as_deref() {
            if model != request.model.as_str() {
                tracing::warn!(
                    "Service answered with model {model} for a {} request",
                    request.model
                );
            }
        }
        Ok(payload)
    }

    fn health(&self) -> Result<ServiceHealth, PredictError> {
        let url = self.settings.endpoint("/");
        let response = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(|err| self.map_call_error(err))?;
        let body = self.read_body(response)?;
        serde_json::from_str(body.trim()).map_err(|err| PredictError::Json(err.to_string()))
    }
}

fn validate_base_url(base_url: &str) -> Result<(), ServiceSetupError> {
    let invalid = |reason: String| ServiceSetupError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let url = reqwest::Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}

/// Content type for an upload, guessed from the file extension.
fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn parse_payload(body: &str) -> Result<PredictionPayload, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::Json("Empty response body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|err| PredictError::Json(format!("{err}: {trimmed}")))
}
