use stratum_dsp::{AnalysisConfig, analyze_audio};

use crate::application::ports::{MonoSignal, Rhythm, RhythmError, RhythmExtractor};

/// Tempo and beat grid from stratum-dsp's onset / autocorrelation analysis.
#[derive(Debug, Default, Clone, Copy)]
pub struct StratumRhythmExtractor;

impl RhythmExtractor for StratumRhythmExtractor {
    fn extract(&self, signal: &MonoSignal) -> Result<Rhythm, RhythmError> {
        tracing::debug!(
            samples = signal.samples.len(),
            sample_rate = signal.sample_rate,
            "Analyzing rhythm with stratum-dsp"
        );

        let result = analyze_audio(&signal.samples, signal.sample_rate, AnalysisConfig::default())
            .map_err(|e| RhythmError::ExtractionFailed(e.to_string()))?;

        if result.bpm.is_nan() || result.bpm <= 0.0 {
            return Err(RhythmError::ExtractionFailed(
                "no tempo detected".to_string(),
            ));
        }

        let ticks: Vec<f64> = result
            .beat_grid
            .beats
            .iter()
            .map(|&t| f64::from(t))
            .collect();

        tracing::debug!(
            bpm = result.bpm,
            beats = ticks.len(),
            "Rhythm analysis finished"
        );

        Ok(Rhythm {
            bpm: f64::from(result.bpm),
            ticks,
        })
    }

    fn name(&self) -> &'static str {
        "stratum-dsp"
    }
}
