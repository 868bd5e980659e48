mod command_runner;
mod demucs_separator;
mod ffmpeg_transcoder;

pub use command_runner::{check_binary, run_tool};
pub use demucs_separator::{DEFAULT_MODEL, DemucsSeparator};
pub use ffmpeg_transcoder::{FfmpegTranscoder, amix_filter};
