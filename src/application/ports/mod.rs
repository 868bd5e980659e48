mod audio_loader;
mod audio_transcoder;
mod job_store;
mod rhythm_extractor;
mod scratch_store;
mod stem_separator;
mod tool_error;

pub use audio_loader::{AudioLoadError, AudioLoader, MonoSignal};
pub use audio_transcoder::{AudioTranscoder, TranscoderError};
pub use job_store::{JobStore, JobStoreError};
pub use rhythm_extractor::{Rhythm, RhythmError, RhythmExtractor};
pub use scratch_store::{ScratchFile, ScratchStore};
pub use stem_separator::{SeparatedStems, SeparatorError, StemSeparator};
pub use tool_error::ToolError;
