use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::prediction::{ModelKind, PredictionPayload, ServiceHealth};

/// Longest preview edge in pixels; larger images are downscaled for display.
pub const PREVIEW_MAX_EDGE: u32 = 512;

/// Form and result state of the prediction view.
#[derive(Clone, Debug, Default)]
pub struct PredictViewState {
    pub model: ModelKind,
    pub image: Option<SelectedImage>,
    pub result: PredictionResult,
    /// Local, user-facing warning (e.g. submit without an image).
    pub warning: Option<String>,
    /// Bumped on every image selection so the renderer can refresh its texture.
    pub image_generation: u64,
}

/// Outcome of the most recent submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PredictionResult {
    #[default]
    NotRequested,
    InFlight,
    Succeeded(PredictionPayload),
    Failed(String),
}

impl PredictionResult {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }
}

/// Reachability of the prediction service as last probed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ServiceStatus {
    #[default]
    Unknown,
    Checking,
    Online(ServiceHealth),
    Offline(String),
}

/// An image chosen for upload, with a decoded preview when possible.
#[derive(Clone, Debug)]
pub struct SelectedImage {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
    /// `None` when the bytes are not a decodable image; upload still proceeds.
    pub preview: Option<PreviewImage>,
}

/// RGBA pixels ready to be uploaded as a texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageSelectError {
    #[error("{} is not a file", path.display())]
    NotAFile { path: PathBuf },
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SelectedImage {
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            file_name: file_name.into(),
            preview: decode_preview(&bytes),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ImageSelectError> {
        if !path.is_file() {
            return Err(ImageSelectError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let bytes = std::fs::read(path).map_err(|source| ImageSelectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_bytes(file_name, bytes))
    }

    /// File size for display, e.g. `"12.4 KB"`.
    pub fn size_label(&self) -> String {
        let len = self.bytes.len() as f64;
        if len < 1024.0 {
            format!("{} B", self.bytes.len())
        } else if len < 1024.0 * 1024.0 {
            format!("{:.1} KB", len / 1024.0)
        } else {
            format!("{:.1} MB", len / (1024.0 * 1024.0))
        }
    }
}

fn decode_preview(bytes: &[u8]) -> Option<PreviewImage> {
    let mut image = image::load_from_memory(bytes).ok()?;
    if image.width() > PREVIEW_MAX_EDGE || image.height() > PREVIEW_MAX_EDGE {
        image = image.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE);
    }
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Some(PreviewImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
