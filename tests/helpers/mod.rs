#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::Request;

use stemdeck::application::ports::{
    AudioLoadError, AudioLoader, AudioTranscoder, MonoSignal, Rhythm, RhythmError,
    RhythmExtractor, SeparatedStems, SeparatorError, StemSeparator, ToolError, TranscoderError,
};
use stemdeck::application::services::{BpmService, SeparationService};
use stemdeck::domain::SourceStem;
use stemdeck::infrastructure::storage::{LocalJobStore, TempScratchStore};
use stemdeck::presentation::config::{
    BpmSettings, LoggingSettings, SeparationSettings, ServerSettings, Settings, StorageSettings,
    TranscoderSettings,
};
use stemdeck::presentation::{AppState, create_router};

pub const TEST_MODEL: &str = "htdemucs_6s";
pub const TEST_CROSSOVER_HZ: u32 = 150;
pub const BOUNDARY: &str = "stemdeck-test-boundary";

/// Writes a Demucs-shaped output tree containing the configured stems.
pub struct FakeSeparator {
    pub stems: Vec<SourceStem>,
}

impl FakeSeparator {
    pub fn six_stems() -> Self {
        Self {
            stems: vec![
                SourceStem::Drums,
                SourceStem::Bass,
                SourceStem::Other,
                SourceStem::Vocals,
                SourceStem::Guitar,
                SourceStem::Piano,
            ],
        }
    }

    pub fn four_stems() -> Self {
        Self {
            stems: SourceStem::REQUIRED.to_vec(),
        }
    }
}

#[async_trait::async_trait]
impl StemSeparator for FakeSeparator {
    async fn separate(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<SeparatedStems, SeparatorError> {
        let track = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "track".to_string());
        let track_dir = output_dir.join(TEST_MODEL).join(track);
        tokio::fs::create_dir_all(&track_dir).await?;

        for stem in &self.stems {
            tokio::fs::write(track_dir.join(stem.file_name()), stem.as_str().as_bytes()).await?;
        }

        Ok(SeparatedStems::new(track_dir))
    }
}

/// Fails the way a crashing separation tool would.
pub struct FailingSeparator;

#[async_trait::async_trait]
impl StemSeparator for FailingSeparator {
    async fn separate(
        &self,
        _input: &Path,
        _output_dir: &Path,
    ) -> Result<SeparatedStems, SeparatorError> {
        Err(SeparatorError::Tool(ToolError::Failed {
            program: "python".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "RuntimeError: CUDA out of memory".to_string(),
        }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranscoderCall {
    LowPass {
        input: PathBuf,
        cutoff_hz: u32,
        output: PathBuf,
    },
    HighPass {
        input: PathBuf,
        cutoff_hz: u32,
        output: PathBuf,
    },
    Mix {
        inputs: Vec<PathBuf>,
        output: PathBuf,
    },
}

/// Records every call and, unless told otherwise, writes a placeholder output file.
#[derive(Default)]
pub struct RecordingTranscoder {
    calls: Mutex<Vec<TranscoderCall>>,
    skip_output: bool,
}

impl RecordingTranscoder {
    /// Reports success without writing anything.
    pub fn without_output() -> Self {
        Self {
            calls: Mutex::default(),
            skip_output: true,
        }
    }

    pub fn calls(&self) -> Vec<TranscoderCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: TranscoderCall, output: &Path) -> Result<(), TranscoderError> {
        self.calls.lock().unwrap().push(call);
        if self.skip_output {
            return Ok(());
        }
        tokio::fs::write(output, b"transcoded")
            .await
            .map_err(|source| {
                TranscoderError::Tool(ToolError::Spawn {
                    program: "ffmpeg".to_string(),
                    source,
                })
            })
    }
}

#[async_trait::async_trait]
impl AudioTranscoder for RecordingTranscoder {
    async fn low_pass(
        &self,
        input: &Path,
        cutoff_hz: u32,
        output: &Path,
    ) -> Result<(), TranscoderError> {
        let call = TranscoderCall::LowPass {
            input: input.to_path_buf(),
            cutoff_hz,
            output: output.to_path_buf(),
        };
        self.record(call, output).await
    }

    async fn high_pass(
        &self,
        input: &Path,
        cutoff_hz: u32,
        output: &Path,
    ) -> Result<(), TranscoderError> {
        let call = TranscoderCall::HighPass {
            input: input.to_path_buf(),
            cutoff_hz,
            output: output.to_path_buf(),
        };
        self.record(call, output).await
    }

    async fn mix(&self, inputs: &[PathBuf], output: &Path) -> Result<(), TranscoderError> {
        let call = TranscoderCall::Mix {
            inputs: inputs.to_vec(),
            output: output.to_path_buf(),
        };
        self.record(call, output).await
    }
}

pub const HIGH_PASS_STDERR: &str = "Invalid argument: highpass filter";

/// Succeeds on the kick low-pass and fails the drums high-pass like a broken ffmpeg.
pub struct FailingHighPassTranscoder;

#[async_trait::async_trait]
impl AudioTranscoder for FailingHighPassTranscoder {
    async fn low_pass(
        &self,
        _input: &Path,
        _cutoff_hz: u32,
        output: &Path,
    ) -> Result<(), TranscoderError> {
        tokio::fs::write(output, b"kick").await.map_err(|source| {
            TranscoderError::Tool(ToolError::Spawn {
                program: "ffmpeg".to_string(),
                source,
            })
        })
    }

    async fn high_pass(
        &self,
        _input: &Path,
        _cutoff_hz: u32,
        _output: &Path,
    ) -> Result<(), TranscoderError> {
        Err(TranscoderError::Tool(ToolError::Failed {
            program: "ffmpeg".to_string(),
            status: "exit status: 1".to_string(),
            stderr: HIGH_PASS_STDERR.to_string(),
        }))
    }

    async fn mix(&self, _inputs: &[PathBuf], _output: &Path) -> Result<(), TranscoderError> {
        Ok(())
    }
}

pub fn scratch_store(dir: &Path) -> Arc<TempScratchStore> {
    Arc::new(TempScratchStore::new(dir, "bpm_"))
}

/// Ignores the file and hands back a short silent signal.
pub struct StubLoader;

impl AudioLoader for StubLoader {
    fn load(&self, path: &Path) -> Result<MonoSignal, AudioLoadError> {
        if !path.is_file() {
            return Err(AudioLoadError::Open(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            )));
        }
        Ok(MonoSignal::new(vec![0.0; 44_100], 44_100))
    }
}

pub struct FailingLoader;

impl AudioLoader for FailingLoader {
    fn load(&self, _path: &Path) -> Result<MonoSignal, AudioLoadError> {
        Err(AudioLoadError::DecodingFailed("unsupported codec".to_string()))
    }
}

pub struct FixedRhythm(pub Rhythm);

impl FixedRhythm {
    pub fn new(bpm: f64, ticks: &[f64]) -> Self {
        Self(Rhythm {
            bpm,
            ticks: ticks.to_vec(),
        })
    }
}

impl RhythmExtractor for FixedRhythm {
    fn extract(&self, _signal: &MonoSignal) -> Result<Rhythm, RhythmError> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Scratch directories backing one test app; removed on drop.
pub struct TestDirs {
    pub output: tempfile::TempDir,
    pub static_root: tempfile::TempDir,
    pub temp: tempfile::TempDir,
}

impl TestDirs {
    pub fn new() -> Self {
        Self {
            output: tempfile::TempDir::new().unwrap(),
            static_root: tempfile::TempDir::new().unwrap(),
            temp: tempfile::TempDir::new().unwrap(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
                max_upload_mb: 10,
            },
            storage: StorageSettings {
                output_root: self.output.path().to_path_buf(),
                static_root: self.static_root.path().to_path_buf(),
                temp_dir: self.temp.path().to_path_buf(),
            },
            separation: SeparationSettings {
                python: "python".to_string(),
                model: TEST_MODEL.to_string(),
                mp3_bitrate: 192,
            },
            transcoder: TranscoderSettings {
                ffmpeg: "ffmpeg".to_string(),
                crossover_hz: TEST_CROSSOVER_HZ,
            },
            bpm: BpmSettings { fallback_bpm: 0 },
            logging: LoggingSettings {
                level: "info".to_string(),
                json: false,
            },
        }
    }

    /// Names of the entries directly under the output root.
    pub fn job_dirs(&self) -> Vec<PathBuf> {
        list_dir(self.output.path())
    }
}

pub fn list_dir(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    entries.sort();
    entries
}

pub struct TestApp {
    pub dirs: TestDirs,
    pub router: Router,
}

pub struct TestAppBuilder {
    separator: Arc<dyn StemSeparator>,
    transcoder: Arc<dyn AudioTranscoder>,
    loader: Arc<dyn AudioLoader>,
    extractor: Arc<dyn RhythmExtractor>,
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self {
            separator: Arc::new(FakeSeparator::six_stems()),
            transcoder: Arc::new(RecordingTranscoder::default()),
            loader: Arc::new(StubLoader),
            extractor: Arc::new(FixedRhythm::new(120.0, &[])),
        }
    }

    pub fn separator(mut self, separator: impl StemSeparator + 'static) -> Self {
        self.separator = Arc::new(separator);
        self
    }

    pub fn transcoder(mut self, transcoder: impl AudioTranscoder + 'static) -> Self {
        self.transcoder = Arc::new(transcoder);
        self
    }

    pub fn loader(mut self, loader: impl AudioLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    pub fn extractor(mut self, extractor: impl RhythmExtractor + 'static) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn build(self) -> TestApp {
        let dirs = TestDirs::new();
        let settings = dirs.settings();

        let separation_service = Arc::new(SeparationService::new(
            Arc::new(LocalJobStore::new(&settings.storage.output_root).unwrap()),
            self.separator,
            self.transcoder,
            settings.transcoder.crossover_hz,
        ));
        let bpm_service = Arc::new(BpmService::new(
            self.loader,
            self.extractor,
            scratch_store(&settings.storage.temp_dir),
            settings.storage.static_root.clone(),
            settings.bpm.fallback_bpm,
        ));

        let router = create_router(AppState {
            separation_service,
            bpm_service,
            settings,
        });

        TestApp { dirs, router }
    }
}

/// A single multipart part: `(field name, optional filename, body)`.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn urlencoded_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
