//! Per-job logging: the export log artifact and UI message stream.

mod job_logger;
mod types;

pub use job_logger::JobLogger;
pub use types::{LogConfig, LogLevel, MessagePrefix, UiLogCallback};
