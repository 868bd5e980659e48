mod bpm_result;
mod job_id;
mod job_workspace;
mod stem;
mod stem_set;

pub use bpm_result::BpmResult;
pub use job_id::JobId;
pub use job_workspace::JobWorkspace;
pub use stem::{SourceStem, StemName};
pub use stem_set::{STEM_URL_PREFIX, StemSet};
