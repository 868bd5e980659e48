use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::JobWorkspace;

/// Owns the per-job directories under the output root.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Allocates a fresh, empty directory for a new job.
    async fn create_job(&self) -> Result<JobWorkspace, JobStoreError>;

    /// Streams the uploaded audio to the job's input path, returning the byte count.
    async fn store_upload(
        &self,
        job: &JobWorkspace,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, JobStoreError>;

    /// Removes the given intermediates. Never fails.
    async fn cleanup(&self, job: &JobWorkspace, paths: &[PathBuf]);

    /// Removes the whole job directory.
    async fn discard(&self, job: &JobWorkspace);
}

#[derive(Debug, thiserror::Error)]
pub enum JobStoreError {
    #[error("failed to create job directory {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to store upload: {0}")]
    Upload(#[source] io::Error),
}
