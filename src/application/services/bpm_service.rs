use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::ports::{
    AudioLoadError, AudioLoader, RhythmError, RhythmExtractor, ScratchFile, ScratchStore,
};
use crate::domain::BpmResult;

/// Tempo and first-beat detection over an uploaded or server-side file.
pub struct BpmService {
    loader: Arc<dyn AudioLoader>,
    extractor: Arc<dyn RhythmExtractor>,
    scratch: Arc<dyn ScratchStore>,
    static_root: PathBuf,
    fallback_bpm: u32,
}

impl BpmService {
    pub fn new(
        loader: Arc<dyn AudioLoader>,
        extractor: Arc<dyn RhythmExtractor>,
        scratch: Arc<dyn ScratchStore>,
        static_root: PathBuf,
        fallback_bpm: u32,
    ) -> Self {
        Self {
            loader,
            extractor,
            scratch,
            static_root,
            fallback_bpm,
        }
    }

    /// Value reported when detection fails.
    pub fn fallback(&self) -> BpmResult {
        BpmResult::fallback(self.fallback_bpm)
    }

    pub async fn receive_upload(
        &self,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<Box<dyn ScratchFile>, DetectionError> {
        self.scratch
            .receive(stream)
            .await
            .map_err(DetectionError::Upload)
    }

    /// Resolves a path relative to the static root, refusing anything that leaves it.
    pub fn resolve_reference(&self, relative: &str) -> Result<PathBuf, DetectionError> {
        let candidate = Path::new(relative);
        let mut has_name = false;
        for component in candidate.components() {
            match component {
                Component::Normal(_) => has_name = true,
                Component::CurDir => {}
                _ => return Err(DetectionError::InvalidPath(relative.to_string())),
            }
        }
        if !has_name {
            return Err(DetectionError::InvalidPath(relative.to_string()));
        }
        Ok(self.static_root.join(candidate))
    }

    pub async fn detect(&self, path: PathBuf) -> Result<BpmResult, DetectionError> {
        let loader = Arc::clone(&self.loader);
        let extractor = Arc::clone(&self.extractor);

        let result = tokio::task::spawn_blocking(move || {
            let signal = loader.load(&path)?;
            tracing::debug!(
                duration_secs = signal.duration_secs(),
                sample_rate = signal.sample_rate,
                extractor = extractor.name(),
                "Audio loaded for tempo detection"
            );
            let rhythm = extractor.extract(&signal)?;
            Ok::<_, DetectionError>(BpmResult::from_rhythm(rhythm.bpm, &rhythm.ticks))
        })
        .await
        .map_err(|e| DetectionError::Join(e.to_string()))??;

        tracing::info!(
            bpm = result.bpm,
            beat_offset = result.beat_offset,
            "Tempo detected"
        );
        Ok(result)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("failed to receive upload: {0}")]
    Upload(#[source] io::Error),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error(transparent)]
    Load(#[from] AudioLoadError),
    #[error(transparent)]
    Extraction(#[from] RhythmError),
    #[error("detection task failed: {0}")]
    Join(String),
}
