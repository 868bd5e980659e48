mod bpm_service;
mod separation_service;

pub use bpm_service::{BpmService, DetectionError};
pub use separation_service::{SeparationError, SeparationService};
