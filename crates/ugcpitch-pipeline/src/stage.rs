use serde::Serialize;

/// A working stage of a pitch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Researching,
    AnalyzingCompetitors,
    CraftingPitch,
}

impl PipelineStage {
    /// Stages in execution order.
    pub const ALL: [PipelineStage; 3] = [
        PipelineStage::Researching,
        PipelineStage::AnalyzingCompetitors,
        PipelineStage::CraftingPitch,
    ];

    /// Progress text shown to the user while the stage runs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PipelineStage::Researching => "Researching brand...",
            PipelineStage::AnalyzingCompetitors => "Analyzing competitors...",
            PipelineStage::CraftingPitch => "Crafting your pitch...",
        }
    }

    /// Whether the stage asks the service to search the web first.
    #[must_use]
    pub const fn uses_web_search(self) -> bool {
        !matches!(self, PipelineStage::CraftingPitch)
    }

    #[must_use]
    pub const fn next(self) -> Option<PipelineStage> {
        match self {
            PipelineStage::Researching => Some(PipelineStage::AnalyzingCompetitors),
            PipelineStage::AnalyzingCompetitors => Some(PipelineStage::CraftingPitch),
            PipelineStage::CraftingPitch => None,
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Researching => write!(f, "researching"),
            PipelineStage::AnalyzingCompetitors => write!(f, "analyzing_competitors"),
            PipelineStage::CraftingPitch => write!(f, "crafting_pitch"),
        }
    }
}

/// Where a run is: `Idle → Running(stage)… → Done`, or `Failed` from any
/// non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running(PipelineStage),
    Done,
    Failed(String),
}

impl RunState {
    /// Moves to the next state. Terminal states stay put.
    #[must_use]
    pub fn advance(self) -> RunState {
        match self {
            RunState::Idle => RunState::Running(PipelineStage::Researching),
            RunState::Running(stage) => stage.next().map_or(RunState::Done, RunState::Running),
            terminal => terminal,
        }
    }

    /// Moves to `Failed` unless the run already finished.
    #[must_use]
    pub fn fail(self, message: impl Into<String>) -> RunState {
        if self.is_terminal() {
            self
        } else {
            RunState::Failed(message.into())
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed(_))
    }

    #[must_use]
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            RunState::Running(stage) => Some(*stage),
            _ => None,
        }
    }
}
