use super::*;
use crate::egui_app::state::SelectedImage;
use crate::prediction::{
    ModelKind, PredictError, PredictRequest, PredictionPayload, ServiceHealth,
};
use std::sync::Mutex;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

type Responder = dyn Fn(&PredictRequest) -> Result<PredictionPayload, PredictError> + Send + Sync;

/// In-process stand-in for the remote service.
pub(super) struct FakeService {
    responder: Box<Responder>,
    calls: Mutex<Vec<(ModelKind, String)>>,
    gate: Option<Mutex<Receiver<()>>>,
    health: Mutex<Option<Result<ServiceHealth, PredictError>>>,
}

impl FakeService {
    pub(super) fn new(
        responder: impl Fn(&PredictRequest) -> Result<PredictionPayload, PredictError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            gate: None,
            health: Mutex::new(None),
        }
    }

    /// Every `predict` call blocks until the returned sender fires once.
    pub(super) fn gated(mut self) -> (Self, Sender<()>) {
        let (tx, rx) = channel();
        self.gate = Some(Mutex::new(rx));
        (self, tx)
    }

    pub(super) fn with_health(self, result: Result<ServiceHealth, PredictError>) -> Self {
        *self.health.lock().unwrap() = Some(result);
        self
    }

    pub(super) fn calls(&self) -> Vec<(ModelKind, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PredictionService for FakeService {
    fn predict(&self, request: &PredictRequest) -> Result<PredictionPayload, PredictError> {
        self.calls
            .lock()
            .unwrap()
            .push((request.model, request.file_name.clone()));
        if let Some(gate) = &self.gate {
            let _ = gate.lock().unwrap().recv();
        }
        (self.responder)(request)
    }

    fn health(&self) -> Result<ServiceHealth, PredictError> {
        self.health
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(PredictError::Transport("no health configured".into())))
    }
}

pub(super) fn controller_with(service: Arc<FakeService>) -> PredictController {
    PredictController::new(service, AppSettings::default())
}

pub(super) fn payload(prediction: &str, confidence: f64) -> PredictionPayload {
    PredictionPayload {
        prediction: prediction.into(),
        confidence,
        status: Some("success".into()),
        model: None,
        composition: None,
        treatment: None,
        risk_level: None,
    }
}

pub(super) fn image(name: &str) -> SelectedImage {
    SelectedImage::from_bytes(name, vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3])
}

/// Poll until no job is outstanding.
pub(super) fn wait_until_idle(controller: &mut PredictController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    controller.poll_jobs();
    while controller.is_busy() {
        assert!(Instant::now() < deadline, "background job did not finish");
        std::thread::sleep(Duration::from_millis(5));
        controller.poll_jobs();
    }
}

/// Poll until `done` holds for the service.
pub(super) fn wait_for(mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(Instant::now() < deadline, "condition not reached");
        std::thread::sleep(Duration::from_millis(5));
    }
}
