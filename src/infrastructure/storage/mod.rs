mod local_job_store;
mod upload;

pub use local_job_store::LocalJobStore;
pub use upload::{TempScratchStore, write_stream};
