use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::ports::{
    AudioTranscoder, JobStore, JobStoreError, SeparatedStems, SeparatorError, StemSeparator,
    TranscoderError,
};
use crate::domain::{JobWorkspace, SourceStem, StemName, StemSet};

/// Turns an uploaded track into the kick / drums / bass / vocals / other bundle.
pub struct SeparationService {
    jobs: Arc<dyn JobStore>,
    separator: Arc<dyn StemSeparator>,
    transcoder: Arc<dyn AudioTranscoder>,
    crossover_hz: u32,
}

impl SeparationService {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        separator: Arc<dyn StemSeparator>,
        transcoder: Arc<dyn AudioTranscoder>,
        crossover_hz: u32,
    ) -> Self {
        Self {
            jobs,
            separator,
            transcoder,
            crossover_hz,
        }
    }

    pub async fn start_job(&self) -> Result<JobWorkspace, SeparationError> {
        Ok(self.jobs.create_job().await?)
    }

    pub async fn store_upload(
        &self,
        workspace: &JobWorkspace,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, SeparationError> {
        Ok(self.jobs.store_upload(workspace, stream).await?)
    }

    /// Drops a job that never got to run.
    pub async fn abandon(&self, workspace: JobWorkspace) {
        self.jobs.discard(&workspace).await;
    }

    /// Runs the pipeline over the upload stored in `workspace`.
    ///
    /// On success the job directory holds exactly the five stems. On failure it is
    /// removed entirely.
    pub async fn run(&self, workspace: JobWorkspace) -> Result<StemSet, SeparationError> {
        let job_id = workspace.job_id();
        let result = self.process_pipeline(&workspace).await;

        match &result {
            Ok(_) => {
                self.jobs
                    .cleanup(&workspace, &workspace.intermediates())
                    .await;
                tracing::info!(job_id = %job_id, "Stem separation completed");
            }
            Err(e) => {
                tracing::error!(job_id = %job_id, error = %e, "Stem separation failed");
                self.jobs.discard(&workspace).await;
            }
        }

        result
    }

    async fn process_pipeline(&self, workspace: &JobWorkspace) -> Result<StemSet, SeparationError> {
        let separated = self
            .separator
            .separate(&workspace.input_path(), &workspace.separation_dir())
            .await?;

        self.split_drums(workspace, &separated).await?;
        self.merge_other(workspace, &separated).await?;

        for (source, target) in [
            (SourceStem::Bass, StemName::Bass),
            (SourceStem::Vocals, StemName::Vocals),
        ] {
            copy_file(&separated.path(source), &workspace.stem_path(target)).await?;
        }

        let stems = StemSet::new(workspace.job_id(), workspace.dir());
        if let Some(missing) = first_missing(&stems).await? {
            return Err(SeparationError::IncompleteStemSet(missing));
        }
        Ok(stems)
    }

    /// Complementary low/high-pass split of the drums stem at one crossover.
    async fn split_drums(
        &self,
        workspace: &JobWorkspace,
        separated: &SeparatedStems,
    ) -> Result<(), SeparationError> {
        let drums = separated.path(SourceStem::Drums);

        tracing::debug!(cutoff_hz = self.crossover_hz, "Extracting kick");
        self.transcoder
            .low_pass(&drums, self.crossover_hz, &workspace.stem_path(StemName::Kick))
            .await
            .map_err(|source| SeparationError::PostProcessing {
                stage: "kick extraction",
                source,
            })?;

        tracing::debug!(cutoff_hz = self.crossover_hz, "Removing kick from drums");
        self.transcoder
            .high_pass(&drums, self.crossover_hz, &workspace.stem_path(StemName::Drums))
            .await
            .map_err(|source| SeparationError::PostProcessing {
                stage: "kick removal",
                source,
            })
    }

    async fn merge_other(
        &self,
        workspace: &JobWorkspace,
        separated: &SeparatedStems,
    ) -> Result<(), SeparationError> {
        let inputs = separated.existing(&SourceStem::MELODIC).await?;
        let output = workspace.stem_path(StemName::Other);

        tracing::debug!(inputs = inputs.len(), "Consolidating melodic stems");

        match inputs.as_slice() {
            [] => Err(SeparationError::MissingStem(SourceStem::Other)),
            [single] => copy_file(single, &output).await,
            _ => self
                .transcoder
                .mix(&inputs, &output)
                .await
                .map_err(|source| SeparationError::PostProcessing {
                    stage: "other consolidation",
                    source,
                }),
        }
    }
}

/// First stem whose file is absent from the job directory, if any.
async fn first_missing(stems: &StemSet) -> Result<Option<StemName>, SeparationError> {
    for stem in StemName::ALL {
        let path = stems.path(stem);
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Ok(Some(stem)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Some(stem)),
            Err(source) => return Err(SeparationError::Inspect { path, source }),
        }
    }
    Ok(None)
}

async fn copy_file(from: &Path, to: &Path) -> Result<(), SeparationError> {
    tokio::fs::copy(from, to)
        .await
        .map(|_| ())
        .map_err(|source| SeparationError::Copy {
            path: from.to_path_buf(),
            source,
        })
}

#[derive(Debug, thiserror::Error)]
pub enum SeparationError {
    #[error(transparent)]
    Workspace(#[from] JobStoreError),
    #[error(transparent)]
    Separation(#[from] SeparatorError),
    #[error("{stage} failed: {source}")]
    PostProcessing {
        stage: &'static str,
        #[source]
        source: TranscoderError,
    },
    #[error("no {0} stem to build the other stem from")]
    MissingStem(SourceStem),
    #[error("failed to copy {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to inspect {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("stem {0} was not produced")]
    IncompleteStemSet(StemName),
}

impl SeparationError {
    /// Captured stderr when an external tool exited non-zero.
    pub fn tool_diagnostics(&self) -> Option<&str> {
        match self {
            SeparationError::Separation(SeparatorError::Tool(e))
            | SeparationError::PostProcessing {
                source: TranscoderError::Tool(e),
                ..
            } => e.diagnostics(),
            _ => None,
        }
    }
}
