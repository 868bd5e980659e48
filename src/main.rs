use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use stemdeck::application::services::{BpmService, SeparationService};
use stemdeck::infrastructure::audio::{StratumRhythmExtractor, SymphoniaAudioLoader};
use stemdeck::infrastructure::observability::{TracingConfig, init_tracing};
use stemdeck::infrastructure::process::{DemucsSeparator, FfmpegTranscoder, check_binary};
use stemdeck::infrastructure::storage::{LocalJobStore, TempScratchStore};
use stemdeck::presentation::{AppState, Environment, Settings, create_router};

const BPM_UPLOAD_PREFIX: &str = "bpm_";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::new(
            environment.as_str(),
            settings.logging.json,
            settings.logging.level.clone(),
        ),
        settings.server.port,
    );

    let separator = DemucsSeparator::new(
        settings.separation.python.clone(),
        settings.separation.model.clone(),
        settings.separation.mp3_bitrate,
    );
    let transcoder = FfmpegTranscoder::new(
        settings.transcoder.ffmpeg.clone(),
        settings.separation.mp3_bitrate,
    );

    if !check_binary(transcoder.binary(), &["-version"]).await {
        tracing::warn!(binary = %transcoder.binary(), "ffmpeg not found, separation will fail");
    }
    if !check_binary(separator.python(), &["-c", "import demucs"]).await {
        tracing::warn!(python = %separator.python(), "Demucs not importable, separation will fail");
    }

    let jobs = LocalJobStore::new(&settings.storage.output_root)
        .context("Failed to prepare output directory")?;

    let separation_service = Arc::new(SeparationService::new(
        Arc::new(jobs),
        Arc::new(separator),
        Arc::new(transcoder),
        settings.transcoder.crossover_hz,
    ));

    let bpm_service = Arc::new(BpmService::new(
        Arc::new(SymphoniaAudioLoader),
        Arc::new(StratumRhythmExtractor),
        Arc::new(TempScratchStore::new(
            &settings.storage.temp_dir,
            BPM_UPLOAD_PREFIX,
        )),
        settings.storage.static_root.clone(),
        settings.bpm.fallback_bpm,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        separation_service,
        bpm_service,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
