//! Runs the three stages against a [`TextGenerator`].

use std::sync::{Arc, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::Instrument;
use ugcpitch_core::{BrandProfile, CompetitorSet, PitchRequest, PitchResult};
use ugcpitch_llm::TextGenerator;
use uuid::Uuid;

use crate::error::PipelineError;
use crate::extract::extract_json_object;
use crate::prompt;
use crate::stage::{PipelineStage, RunState};

/// Sequential brand → competitors → pitch pipeline.
///
/// One run at a time: [`PitchPipeline::run`] returns [`PipelineError::Busy`]
/// while another run holds the pipeline. Runs cannot be cancelled once
/// started; wrap them with [`PitchPipeline::run_with_timeout`] to bound them.
pub struct PitchPipeline {
    generator: Arc<dyn TextGenerator>,
    active: Mutex<()>,
    state: std::sync::Mutex<RunState>,
}

impl PitchPipeline {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            active: Mutex::new(()),
            state: std::sync::Mutex::new(RunState::Idle),
        }
    }

    /// State of the current or most recent run.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.try_lock().is_err()
    }

    /// Runs all three stages for `request`.
    ///
    /// `progress` is called with each stage before its generation call starts.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Busy`] if a run is already in progress.
    /// - [`PipelineError::Generation`] if any generation call fails; later
    ///   stages are not attempted.
    pub async fn run<F>(
        &self,
        request: &PitchRequest,
        mut progress: F,
    ) -> Result<PitchResult, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        let Ok(_guard) = self.active.try_lock() else {
            tracing::warn!(brand = %request.brand_input(), "rejecting pitch run: pipeline busy");
            return Err(PipelineError::Busy);
        };

        self.execute(request, &mut progress).await
    }

    /// Like [`PitchPipeline::run`], but gives up after `limit`.
    ///
    /// # Errors
    ///
    /// Everything [`PitchPipeline::run`] returns, plus
    /// [`PipelineError::TimedOut`] when `limit` elapses first.
    pub async fn run_with_timeout<F>(
        &self,
        request: &PitchRequest,
        limit: Duration,
        mut progress: F,
    ) -> Result<PitchResult, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        let Ok(_guard) = self.active.try_lock() else {
            tracing::warn!(brand = %request.brand_input(), "rejecting pitch run: pipeline busy");
            return Err(PipelineError::Busy);
        };

        let run = self.execute(request, &mut progress);
        if let Ok(result) = tokio::time::timeout(limit, run).await {
            result
        } else {
            let err = PipelineError::TimedOut {
                secs: limit.as_secs(),
            };
            tracing::error!(
                brand = %request.brand_input(),
                stage = ?self.state().stage(),
                "pitch run timed out"
            );
            self.transition(|state| state.fail(err.display_message()));
            Err(err)
        }
    }

    async fn execute<F>(
        &self,
        request: &PitchRequest,
        progress: &mut F,
    ) -> Result<PitchResult, PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "pitch_run",
            %run_id,
            brand = %request.brand_input(),
            generator = self.generator.name()
        );

        async {
            self.transition(|_| RunState::Idle);

            match self.run_stages(request, progress).await {
                Ok((pitch, brand, competitors)) => {
                    self.transition(RunState::advance);
                    tracing::info!(
                        competitors = competitors.len(),
                        pitch_chars = pitch.chars().count(),
                        "pitch run complete"
                    );
                    Ok(PitchResult::new(run_id, pitch, brand, competitors))
                }
                Err(err) => {
                    tracing::error!(stage = ?err.stage(), error = %err, "pitch run failed");
                    self.transition(|state| state.fail(err.display_message()));
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_stages<F>(
        &self,
        request: &PitchRequest,
        progress: &mut F,
    ) -> Result<(String, BrandProfile, CompetitorSet), PipelineError>
    where
        F: FnMut(PipelineStage) + Send,
    {
        let stage = self.enter(PipelineStage::Researching, progress);
        let raw = self
            .generate(stage, &prompt::brand_research_prompt(request.brand_input()))
            .await?;
        let brand = extract_json_object(&raw)
            .and_then(BrandProfile::from_extracted)
            .unwrap_or_else(|| {
                tracing::warn!(
                    raw_bytes = raw.len(),
                    "no brand JSON in reply; using fallback profile"
                );
                BrandProfile::fallback(request.brand_input(), &raw)
            });
        tracing::debug!(
            brand_name = %brand.brand_name,
            industry = %brand.industry,
            "brand researched"
        );

        let stage = self.enter(PipelineStage::AnalyzingCompetitors, progress);
        let raw = self
            .generate(stage, &prompt::competitor_research_prompt(&brand))
            .await?;
        let competitors = extract_json_object(&raw)
            .and_then(CompetitorSet::from_extracted)
            .unwrap_or_else(|| {
                tracing::warn!(
                    raw_bytes = raw.len(),
                    "no competitor JSON in reply; using fallback list"
                );
                CompetitorSet::fallback()
            });
        tracing::debug!(competitors = competitors.len(), "competitors researched");

        let stage = self.enter(PipelineStage::CraftingPitch, progress);
        let pitch = self
            .generate(stage, &prompt::pitch_prompt(request, &brand, &competitors))
            .await?;

        Ok((pitch, brand, competitors))
    }

    /// Moves into `stage` and reports it before any network call.
    fn enter<F>(&self, stage: PipelineStage, progress: &mut F) -> PipelineStage
    where
        F: FnMut(PipelineStage),
    {
        self.transition(|_| RunState::Running(stage));
        tracing::info!(stage = %stage, "{}", stage.label());
        progress(stage);
        stage
    }

    async fn generate(
        &self,
        stage: PipelineStage,
        prompt: &str,
    ) -> Result<String, PipelineError> {
        self.generator
            .generate(prompt, stage.uses_web_search())
            .await
            .map_err(|source| PipelineError::Generation { stage, source })
    }

    fn transition(&self, f: impl FnOnce(RunState) -> RunState) -> RunState {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let next = f(std::mem::take(&mut *state));
        *state = next.clone();
        next
    }
}
