use super::MonoSignal;

#[derive(Debug, Clone, PartialEq)]
pub struct Rhythm {
    pub bpm: f64,
    /// Beat positions in seconds, ascending.
    pub ticks: Vec<f64>,
}

pub trait RhythmExtractor: Send + Sync {
    fn extract(&self, signal: &MonoSignal) -> Result<Rhythm, RhythmError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum RhythmError {
    #[error("rhythm extraction failed: {0}")]
    ExtractionFailed(String),
}
