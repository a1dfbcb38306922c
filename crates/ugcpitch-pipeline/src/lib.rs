//! Three-stage research-then-write pipeline.
//!
//! 1. Research the brand (web search on).
//! 2. Research its competitors (web search on).
//! 3. Write the pitch from both (web search off).
//!
//! Extraction misses in stages 1 and 2 are replaced by fallback values so a
//! run only fails when the generation service itself fails.

pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod prompt;
pub mod stage;

pub use error::PipelineError;
pub use extract::extract_json_object;
pub use orchestrator::PitchPipeline;
pub use stage::{PipelineStage, RunState};
