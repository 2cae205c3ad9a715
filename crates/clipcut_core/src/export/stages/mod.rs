//! Concrete export pipeline stages.

mod concat;
mod extract;

pub use concat::ConcatStage;
pub use extract::ExtractStage;
