use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::domain::STEM_URL_PREFIX;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{detect_bpm_handler, health_handler, separate_handler};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let storage = &state.settings.storage;
    let stem_files = ServeDir::new(&storage.output_root);
    let static_files = ServeDir::new(&storage.static_root).append_index_html_on_directories(true);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/separate", post(separate_handler))
        .route("/api/detect-bpm", post(detect_bpm_handler))
        .nest_service(STEM_URL_PREFIX, stem_files)
        .fallback_service(static_files)
        .layer(DefaultBodyLimit::max(state.settings.server.max_upload_bytes()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
