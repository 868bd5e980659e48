use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::command_runner::run_tool;
use crate::application::ports::{SeparatedStems, SeparatorError, StemSeparator};
use crate::domain::SourceStem;

pub const DEFAULT_MODEL: &str = "htdemucs_6s";

/// Runs Demucs as `<python> -m demucs`, writing MP3 stems.
///
/// Demucs lays its output out as `<output_dir>/<model>/<track>/<stem>.mp3`.
#[derive(Debug, Clone)]
pub struct DemucsSeparator {
    python: String,
    model: String,
    mp3_bitrate: u32,
}

impl DemucsSeparator {
    pub fn new(python: impl Into<String>, model: impl Into<String>, mp3_bitrate: u32) -> Self {
        Self {
            python: python.into(),
            model: model.into(),
            mp3_bitrate,
        }
    }

    pub fn python(&self) -> &str {
        &self.python
    }

    fn args(&self, input: &Path, output_dir: &Path) -> Vec<OsString> {
        vec![
            "-m".into(),
            "demucs".into(),
            "--mp3".into(),
            "--mp3-bitrate".into(),
            self.mp3_bitrate.to_string().into(),
            "-n".into(),
            self.model.clone().into(),
            "-o".into(),
            output_dir.into(),
            input.into(),
        ]
    }

    async fn find_track_dir(&self, output_dir: &Path) -> Result<PathBuf, SeparatorError> {
        let model_dir = output_dir.join(&self.model);
        let mut entries = match tokio::fs::read_dir(&model_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SeparatorError::NoOutput);
            }
            Err(e) => return Err(SeparatorError::Io(e)),
        };

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                return Ok(entry.path());
            }
        }

        Err(SeparatorError::NoOutput)
    }
}

#[async_trait]
impl StemSeparator for DemucsSeparator {
    #[tracing::instrument(skip(self), fields(model = %self.model))]
    async fn separate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<SeparatedStems, SeparatorError> {
        run_tool(&self.python, &self.args(input, output_dir)).await?;

        let stems = SeparatedStems::new(self.find_track_dir(output_dir).await?);

        for stem in SourceStem::REQUIRED {
            if !tokio::fs::try_exists(stems.path(stem)).await? {
                return Err(SeparatorError::MissingStem(stem));
            }
        }

        tracing::info!(track_dir = %stems.track_dir().display(), "Separation finished");
        Ok(stems)
    }
}
