//! Effect runtime.
//!
//! Each [`Effect`] becomes a tokio task whose settlement is posted back to
//! the render loop as an [`Action::App`] message. Tasks are never cancelled;
//! a request the user no longer cares about is dropped by the reducer's
//! request-id check when it settles.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use karipap_models::{ImageFile, ModelError};
use karipap_sdk::DetectorClient;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::app_state::{Effect, Message};
use crate::tui::Action;

const UNKNOWN_MIME: &str = "application/octet-stream";

/// Why a path did not yield an [`ImageFile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("{0}")]
    Read(String),
    /// The file was refused before its content was read.
    #[error(transparent)]
    Rejected(#[from] ModelError),
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Read(e.to_string())
    }
}

fn too_large(file_name: String, size: u64, limit: u64) -> LoadError {
    ModelError::ImageTooLarge {
        file_name,
        size,
        limit,
    }
    .into()
}

/// Read `path` and sniff what it is.
///
/// Files larger than `max_bytes` are refused from their metadata and never
/// read. The MIME type comes from the file's magic bytes, not its
/// extension. Dimensions are filled in when the header can be decoded.
pub fn load_image(path: &Path, max_bytes: u64) -> Result<ImageFile, LoadError> {
    let file_name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    let file = File::open(path)?;
    let size = file.metadata()?.len();
    if size > max_bytes {
        debug!(file = %file_name, size, limit = max_bytes, "file refused before reading");
        return Err(too_large(file_name, size, max_bytes));
    }

    // The file can grow between the stat and the read.
    let mut bytes = Vec::with_capacity(usize::try_from(size).unwrap_or_default());
    file.take(max_bytes.saturating_add(1)).read_to_end(&mut bytes)?;
    let read = bytes.len() as u64;
    if read > max_bytes {
        return Err(too_large(file_name, read, max_bytes));
    }

    let format = image::guess_format(&bytes).ok();
    let mime = format.map_or(UNKNOWN_MIME, |f| f.to_mime_type()).to_string();
    let dimensions = format.and_then(|f| {
        image::ImageReader::with_format(Cursor::new(&bytes), f)
            .into_dimensions()
            .ok()
    });

    debug!(file = %file_name, mime = %mime, size = read, "file read");
    Ok(ImageFile {
        file_name,
        mime,
        dimensions,
        bytes,
    })
}

/// Spawns effect tasks against one backend.
#[derive(Clone)]
pub struct EffectRunner {
    client: DetectorClient,
    tx: UnboundedSender<Action>,
}

impl EffectRunner {
    pub fn new(client: DetectorClient, tx: UnboundedSender<Action>) -> Self {
        Self { client, tx }
    }

    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::CheckHealth { announce } => {
                let client = self.client.clone();
                self.settle(async move {
                    let health = client.check_health().await;
                    Message::HealthChecked { health, announce }
                });
            }
            Effect::LoadImage { path, max_bytes } => {
                self.settle(async move {
                    let result = tokio::task::spawn_blocking(move || load_image(&path, max_bytes))
                        .await
                        .unwrap_or_else(|e| Err(LoadError::Read(e.to_string())));
                    Message::ImageLoaded(result)
                });
            }
            Effect::Dispatch(request) => {
                let client = self.client.clone();
                self.settle(async move {
                    let outcome = client.detect_or_error(&request).await;
                    Message::DetectionSettled {
                        id: request.id,
                        outcome,
                    }
                });
            }
            Effect::ProbeOcr { id, payload } => {
                let client = self.client.clone();
                self.settle(async move {
                    let result = client.test_ocr(&payload).await.map_err(|e| {
                        warn!(error = %e, "OCR probe failed");
                        e.to_string()
                    });
                    Message::OcrProbeSettled { id, result }
                });
            }
            // Handled by the render loop.
            Effect::Quit => {}
        }
    }

    fn settle<F>(&self, task: F)
    where
        F: std::future::Future<Output = Message> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let message = task.await;
            // The receiver is gone only when the UI is shutting down.
            let _ = tx.send(Action::App(message));
        });
    }
}
