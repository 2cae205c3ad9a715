//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::models::EncodingMode;

/// Default re-encode parameter string used when none is configured.
pub const DEFAULT_REENCODE_OPTIONS: &str = "-c:v libx264 -preset ultrafast -crf 18";

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Output encoding configuration.
    #[serde(default)]
    pub encoding: EncodingSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Output encoding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingSettings {
    /// Encoding strategy for extraction (`copy` or `reencode`).
    #[serde(default)]
    pub mode: EncodingMode,

    /// Raw re-encode parameter string, whitespace-tokenized at use.
    #[serde(default = "default_reencode_options")]
    pub reencode_options: String,
}

fn default_reencode_options() -> String {
    DEFAULT_REENCODE_OPTIONS.to_string()
}

impl Default for EncodingSettings {
    fn default() -> Self {
        Self {
            mode: EncodingMode::default(),
            reencode_options: default_reencode_options(),
        }
    }
}

impl EncodingSettings {
    /// Resolve the re-encode parameter tokens.
    ///
    /// The stored string is split on whitespace, so tokens containing
    /// literal spaces cannot be expressed. This is a known limitation of
    /// the option format; adding quoting support would change how
    /// existing configurations are interpreted. A blank string resolves
    /// to [`DEFAULT_REENCODE_OPTIONS`].
    pub fn reencode_tokens(&self) -> Vec<String> {
        let options = self.reencode_options.trim();
        let options = if options.is_empty() {
            DEFAULT_REENCODE_OPTIONS
        } else {
            options
        };
        options.split_whitespace().map(str::to_string).collect()
    }
}

/// Logging configuration for the per-job export log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Keep raw tool output out of the UI stream (still kept in the tail).
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Number of captured output lines to show after an error.
    #[serde(default = "default_error_tail")]
    pub error_tail: usize,

    /// Show timestamps in log output.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

fn default_true() -> bool {
    true
}

fn default_error_tail() -> usize {
    20
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            compact: true,
            error_tail: default_error_tail(),
            show_timestamps: true,
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Encoding,
    Logging,
}

impl ConfigSection {
    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Encoding => "encoding",
            ConfigSection::Logging => "logging",
        }
    }
}
