use std::path::{Path, PathBuf};

use super::{JobId, StemName};

/// URL prefix under which finished job directories are served.
pub const STEM_URL_PREFIX: &str = "/server/output";

/// The finished stems of one job, all living in the job directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StemSet {
    job_id: JobId,
    job_dir: PathBuf,
}

impl StemSet {
    pub fn new(job_id: JobId, job_dir: impl Into<PathBuf>) -> Self {
        Self {
            job_id,
            job_dir: job_dir.into(),
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn job_dir(&self) -> &Path {
        &self.job_dir
    }

    pub fn path(&self, stem: StemName) -> PathBuf {
        self.job_dir.join(stem.file_name())
    }

    pub fn url(&self, stem: StemName) -> String {
        format!("{}/{}/{}", STEM_URL_PREFIX, self.job_id, stem.file_name())
    }
}
