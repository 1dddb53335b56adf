use std::sync::{
    Arc,
    mpsc::{Receiver, Sender},
};
use std::thread;

use crate::prediction::{
    ModelKind, PredictError, PredictRequest, PredictionPayload, PredictionService, ServiceHealth,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PredictionFinished(PredictionJobResult),
    HealthChecked(HealthCheckResult),
}

#[derive(Debug)]
pub(crate) struct PredictionJobResult {
    pub(crate) request_id: u64,
    pub(crate) model: ModelKind,
    pub(crate) result: Result<PredictionPayload, PredictError>,
}

#[derive(Debug)]
pub(crate) struct HealthCheckResult {
    pub(crate) result: Result<ServiceHealth, PredictError>,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    next_request_id: u64,
    active_prediction: Option<u64>,
    health_check_in_progress: bool,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            next_request_id: 1,
            active_prediction: None,
            health_check_in_progress: false,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn prediction_in_flight(&self) -> bool {
        self.active_prediction.is_some()
    }

    /// Spawn a worker for `request` and return its id.
    pub(super) fn begin_prediction(
        &mut self,
        service: Arc<dyn PredictionService>,
        request: PredictRequest,
    ) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1).max(1);
        self.active_prediction = Some(request_id);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.predict(&request);
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult {
                request_id,
                model: request.model,
                result,
            }));
        });
        request_id
    }

    /// Stop waiting for the outstanding prediction; its result will be dropped.
    pub(super) fn forget_active_prediction(&mut self) {
        self.active_prediction = None;
    }

    /// Clear the active request if `request_id` matches; false means the result is stale.
    pub(super) fn finish_prediction(&mut self, request_id: u64) -> bool {
        if self.active_prediction == Some(request_id) {
            self.active_prediction = None;
            true
        } else {
            false
        }
    }

    pub(super) fn health_check_in_progress(&self) -> bool {
        self.health_check_in_progress
    }

    pub(super) fn begin_health_check(&mut self, service: Arc<dyn PredictionService>) {
        if self.health_check_in_progress {
            return;
        }
        self.health_check_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = service.health();
            let _ = tx.send(JobMessage::HealthChecked(HealthCheckResult { result }));
        });
    }

    pub(super) fn clear_health_check(&mut self) {
        self.health_check_in_progress = false;
    }
}
