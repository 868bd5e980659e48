use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::ToolError;

/// Filter and mix operations backed by an external transcoder.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    async fn low_pass(
        &self,
        input: &Path,
        cutoff_hz: u32,
        output: &Path,
    ) -> Result<(), TranscoderError>;

    async fn high_pass(
        &self,
        input: &Path,
        cutoff_hz: u32,
        output: &Path,
    ) -> Result<(), TranscoderError>;

    /// Equal-weight mix padded to the longest input.
    async fn mix(&self, inputs: &[PathBuf], output: &Path) -> Result<(), TranscoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscoderError {
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("mix needs at least two inputs, got {0}")]
    TooFewInputs(usize),
}
