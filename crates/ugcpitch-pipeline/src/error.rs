use thiserror::Error;
use ugcpitch_llm::LlmError;

use crate::stage::PipelineStage;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Another run holds the pipeline.
    #[error("a pitch run is already in progress")]
    Busy,

    /// The generation service failed; the run was aborted at `stage`.
    #[error("{source}")]
    Generation {
        stage: PipelineStage,
        #[source]
        source: LlmError,
    },

    #[error("pitch run timed out after {secs}s")]
    TimedOut { secs: u64 },
}

impl PipelineError {
    /// Message suitable for showing to the user as-is.
    #[must_use]
    pub fn display_message(&self) -> String {
        format!("Error: {self}")
    }

    /// Stage that was running when the error occurred, if any.
    #[must_use]
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            PipelineError::Generation { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
