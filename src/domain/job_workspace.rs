use std::path::{Path, PathBuf};

use super::{JobId, StemName};

const INPUT_FILE_NAME: &str = "input_audio";
const SEPARATION_DIR_NAME: &str = "demucs_out";

/// Directory layout of a single separation job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobWorkspace {
    job_id: JobId,
    dir: PathBuf,
}

impl JobWorkspace {
    pub fn new(job_id: JobId, dir: impl Into<PathBuf>) -> Self {
        Self {
            job_id,
            dir: dir.into(),
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the uploaded audio is stored.
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(INPUT_FILE_NAME)
    }

    /// Root of the separation tool's output tree.
    pub fn separation_dir(&self) -> PathBuf {
        self.dir.join(SEPARATION_DIR_NAME)
    }

    pub fn stem_path(&self, stem: StemName) -> PathBuf {
        self.dir.join(stem.file_name())
    }

    /// Files and directories that are removed once the stems are final.
    pub fn intermediates(&self) -> [PathBuf; 2] {
        [self.separation_dir(), self.input_path()]
    }
}
