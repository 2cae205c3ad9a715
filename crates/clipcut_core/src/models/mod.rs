//! Shared value types (segments, job snapshots, enums).

mod enums;
mod jobs;

pub use enums::EncodingMode;
pub use jobs::{ExportJob, ExportOutcome, Segment};
