use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub separation: SeparationSettings,
    pub transcoder: TranscoderSettings,
    pub bpm: BpmSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// One subdirectory per job lives here.
    pub output_root: PathBuf,
    /// Frontend bundle, also the base for `path` references in tempo detection.
    pub static_root: PathBuf,
    /// Scratch space for tempo-detection uploads.
    pub temp_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeparationSettings {
    pub python: String,
    pub model: String,
    pub mp3_bitrate: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscoderSettings {
    pub ffmpeg: String,
    /// Shared cutoff of the kick low-pass and the drums high-pass.
    pub crossover_hz: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BpmSettings {
    pub fallback_bpm: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Settings {
    /// Defaults, then `appsettings.<environment>.*`, then `APP_`-prefixed variables
    /// (`APP_SERVER__PORT=8080`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let temp_dir = std::env::temp_dir();

        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.max_upload_mb", 200)?
            .set_default("storage.output_root", "server/output")?
            .set_default("storage.static_root", ".")?
            .set_default("storage.temp_dir", temp_dir.to_string_lossy().into_owned())?
            .set_default("separation.python", "python")?
            .set_default("separation.model", "htdemucs_6s")?
            .set_default("separation.mp3_bitrate", 192)?
            .set_default("transcoder.ffmpeg", "ffmpeg")?
            .set_default("transcoder.crossover_hz", 150)?
            .set_default("bpm.fallback_bpm", 0)?
            .set_default("logging.level", "info,stemdeck=debug,tower_http=debug")?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
