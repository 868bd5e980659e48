use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use super::upload::write_stream;
use crate::application::ports::{JobStore, JobStoreError};
use crate::domain::{JobId, JobWorkspace};

/// Job directories on the local filesystem, one per job under a fixed output root.
#[derive(Debug, Clone)]
pub struct LocalJobStore {
    output_root: PathBuf,
}

impl LocalJobStore {
    pub fn new(output_root: impl Into<PathBuf>) -> Result<Self, io::Error> {
        let output_root = output_root.into();
        std::fs::create_dir_all(&output_root)?;
        Ok(Self { output_root })
    }
}

#[async_trait]
impl JobStore for LocalJobStore {
    async fn create_job(&self) -> Result<JobWorkspace, JobStoreError> {
        let job_id = JobId::new();
        let dir = self.output_root.join(job_id.to_string());

        // create_dir, not create_dir_all: an existing directory must fail.
        tokio::fs::create_dir(&dir)
            .await
            .map_err(|source| JobStoreError::Create {
                path: dir.clone(),
                source,
            })?;

        tracing::debug!(job_id = %job_id, dir = %dir.display(), "Job workspace created");
        Ok(JobWorkspace::new(job_id, dir))
    }

    async fn store_upload(
        &self,
        job: &JobWorkspace,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, JobStoreError> {
        write_stream(&job.input_path(), stream)
            .await
            .map_err(JobStoreError::Upload)
    }

    async fn cleanup(&self, job: &JobWorkspace, paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = remove_path(path).await {
                tracing::warn!(
                    job_id = %job.job_id(),
                    path = %path.display(),
                    error = %e,
                    "Failed to remove intermediate artifact"
                );
            }
        }
    }

    async fn discard(&self, job: &JobWorkspace) {
        if let Err(e) = remove_path(job.dir()).await {
            tracing::warn!(
                job_id = %job.job_id(),
                error = %e,
                "Failed to remove job directory"
            );
        }
    }
}

async fn remove_path(path: &Path) -> Result<(), io::Error> {
    let metadata = match tokio::fs::symlink_metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let result = if metadata.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };

    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
