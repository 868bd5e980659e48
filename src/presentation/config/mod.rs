mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    BpmSettings, LoggingSettings, SeparationSettings, ServerSettings, Settings, StorageSettings,
    TranscoderSettings,
};
