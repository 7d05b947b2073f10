pub mod pipeline;
pub mod semantics;

pub use pipeline::{Pipeline, PipelineConfig, PipelineError, PipelineOutput};
