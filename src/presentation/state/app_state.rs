use std::sync::Arc;

use crate::application::services::{BpmService, SeparationService};
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub separation_service: Arc<SeparationService>,
    pub bpm_service: Arc<BpmService>,
    pub settings: Settings,
}
