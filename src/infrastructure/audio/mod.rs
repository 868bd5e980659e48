mod audio_decoder;
mod stratum_rhythm_extractor;

pub use audio_decoder::SymphoniaAudioLoader;
pub use stratum_rhythm_extractor::StratumRhythmExtractor;
