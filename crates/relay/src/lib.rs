pub mod codec;
pub mod errors;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod steps;
pub mod tools;

pub use errors::{RelayError, RelayResult};
pub use pipeline::{Pipeline, PipelineRun, RunStatus};
