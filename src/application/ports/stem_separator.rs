use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::ToolError;
use crate::domain::SourceStem;

/// Directory holding the per-instrument files of one separated track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatedStems {
    track_dir: PathBuf,
}

impl SeparatedStems {
    pub fn new(track_dir: impl Into<PathBuf>) -> Self {
        Self {
            track_dir: track_dir.into(),
        }
    }

    pub fn track_dir(&self) -> &Path {
        &self.track_dir
    }

    pub fn path(&self, stem: SourceStem) -> PathBuf {
        self.track_dir.join(stem.file_name())
    }

    /// Paths of the given stems that are present on disk, in the given order.
    pub async fn existing(&self, stems: &[SourceStem]) -> Result<Vec<PathBuf>, SeparatorError> {
        let mut found = Vec::with_capacity(stems.len());
        for stem in stems {
            let path = self.path(*stem);
            if tokio::fs::try_exists(&path).await? {
                found.push(path);
            }
        }
        Ok(found)
    }
}

#[async_trait]
pub trait StemSeparator: Send + Sync {
    /// Separates `input` into stems written somewhere below `output_dir`.
    async fn separate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<SeparatedStems, SeparatorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SeparatorError {
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("Demucs produced no output")]
    NoOutput,
    #[error("separation output is missing the {0} stem")]
    MissingStem(SourceStem),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
