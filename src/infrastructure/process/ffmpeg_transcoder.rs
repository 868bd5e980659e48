use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::command_runner::run_tool;
use crate::application::ports::{AudioTranscoder, TranscoderError};

/// Filters and mixes through the `ffmpeg` command line, encoding at a fixed bitrate.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    binary: String,
    bitrate_kbps: u32,
}

impl FfmpegTranscoder {
    pub fn new(binary: impl Into<String>, bitrate_kbps: u32) -> Self {
        Self {
            binary: binary.into(),
            bitrate_kbps,
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn filter_args(&self, input: &Path, filter: &str, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-i".into(),
            input.into(),
            "-af".into(),
            filter.into(),
            "-b:a".into(),
            format!("{}k", self.bitrate_kbps).into(),
            output.into(),
        ]
    }

    fn mix_args(&self, inputs: &[PathBuf], output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into()];
        for input in inputs {
            args.push("-i".into());
            args.push(input.into());
        }
        args.push("-filter_complex".into());
        args.push(amix_filter(inputs.len()).into());
        args.push("-b:a".into());
        args.push(format!("{}k", self.bitrate_kbps).into());
        args.push(output.into());
        args
    }
}

/// `[0:a][1:a]...amix=inputs=N:duration=longest`
pub fn amix_filter(inputs: usize) -> String {
    let mut filter: String = (0..inputs).map(|i| format!("[{}:a]", i)).collect();
    filter.push_str(&format!("amix=inputs={}:duration=longest", inputs));
    filter
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    async fn low_pass(
        &self,
        input: &Path,
        cutoff_hz: u32,
        output: &Path,
    ) -> Result<(), TranscoderError> {
        let filter = format!("lowpass=f={}", cutoff_hz);
        run_tool(&self.binary, &self.filter_args(input, &filter, output)).await?;
        Ok(())
    }

    async fn high_pass(
        &self,
        input: &Path,
        cutoff_hz: u32,
        output: &Path,
    ) -> Result<(), TranscoderError> {
        let filter = format!("highpass=f={}", cutoff_hz);
        run_tool(&self.binary, &self.filter_args(input, &filter, output)).await?;
        Ok(())
    }

    async fn mix(&self, inputs: &[PathBuf], output: &Path) -> Result<(), TranscoderError> {
        if inputs.len() < 2 {
            return Err(TranscoderError::TooFewInputs(inputs.len()));
        }
        run_tool(&self.binary, &self.mix_args(inputs, output)).await?;
        Ok(())
    }
}
