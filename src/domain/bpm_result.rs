#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpmResult {
    pub bpm: u32,
    /// Seconds from the start of the signal to the first detected beat.
    pub beat_offset: f64,
}

impl BpmResult {
    pub fn from_rhythm(tempo: f64, ticks: &[f64]) -> Self {
        let bpm = if tempo.is_finite() {
            tempo.round().max(0.0) as u32
        } else {
            0
        };
        let beat_offset = ticks.first().copied().unwrap_or(0.0);
        Self { bpm, beat_offset }
    }

    pub fn fallback(bpm: u32) -> Self {
        Self {
            bpm,
            beat_offset: 0.0,
        }
    }
}
