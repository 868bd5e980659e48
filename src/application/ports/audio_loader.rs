use std::path::Path;

/// Single-channel PCM at the file's own sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoSignal {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl MonoSignal {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }
}

pub trait AudioLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<MonoSignal, AudioLoadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioLoadError {
    #[error("cannot open audio file: {0}")]
    Open(#[from] std::io::Error),
    #[error("decoding failed: {0}")]
    DecodingFailed(String),
}
