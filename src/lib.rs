//! Desktop client for the AgriML image classification service.
/// Application directory resolution.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// egui front end.
pub mod egui_app;
pub(crate) mod http_client;
/// Tracing setup and log file rotation.
pub mod logging;
/// Remote prediction service client.
pub mod prediction;
