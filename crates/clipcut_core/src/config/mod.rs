//! Persisted configuration: settings structs and the TOML-backed manager.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, EncodingSettings, LoggingSettings, Settings, DEFAULT_REENCODE_OPTIONS,
};
