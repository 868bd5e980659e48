pub mod audio;
pub mod observability;
pub mod process;
pub mod storage;
