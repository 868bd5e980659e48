mod detect_bpm;
mod health;
mod separate;

pub use detect_bpm::{BpmErrorResponse, BpmResponse, detect_bpm_handler};
pub use health::health_handler;
pub use separate::{ErrorResponse, SeparateResponse, StemUrls, separate_handler};
