use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ugcpitch_core::{BrandProfile, CompetitorSet, PitchRequest, ResearchSummary};
use ugcpitch_pipeline::{PipelineError, PipelineStage, RunState};
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Form fields. Creator fields left out are taken from the server defaults.
#[derive(Debug, Deserialize)]
pub(super) struct CreatePitchRequest {
    #[serde(default)]
    pub brand_input: String,
    pub personal_story: Option<String>,
    pub pitch_focus: Option<String>,
    pub creator_name: Option<String>,
    pub portfolio_url: Option<String>,
    pub social_handle: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct PitchResearch {
    pub brand: BrandProfile,
    pub competitors: CompetitorSet,
}

#[derive(Debug, Serialize)]
pub(super) struct PitchResponse {
    pub pitch: String,
    pub research: PitchResearch,
    pub summary: ResearchSummary,
    /// Progress labels in the order the stages ran.
    pub steps: Vec<&'static str>,
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct PitchStatus {
    pub state: &'static str,
    pub stage: Option<PipelineStage>,
    pub label: Option<&'static str>,
    pub error: Option<String>,
}

impl From<RunState> for PitchStatus {
    fn from(state: RunState) -> Self {
        let stage = state.stage();
        let (name, error) = match state {
            RunState::Idle => ("idle", None),
            RunState::Running(_) => ("running", None),
            RunState::Done => ("done", None),
            RunState::Failed(message) => ("failed", Some(message)),
        };
        Self {
            state: name,
            stage,
            label: stage.map(PipelineStage::label),
            error,
        }
    }
}

/// POST /api/v1/pitch: research the brand and write a pitch.
pub(super) async fn create_pitch(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreatePitchRequest>,
) -> Result<Json<ApiResponse<PitchResponse>>, ApiError> {
    let rid = &req_id.0;

    let creator = state
        .creator
        .resolve(
            body.creator_name.as_deref(),
            body.portfolio_url.as_deref(),
            body.social_handle.as_deref(),
        )
        .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))?;
    let request = PitchRequest::new(
        &body.brand_input,
        body.personal_story.as_deref(),
        body.pitch_focus.as_deref(),
        creator,
    )
    .map_err(|e| ApiError::new(rid, "validation_error", e.to_string()))?;

    let mut steps = Vec::with_capacity(PipelineStage::ALL.len());
    let result = state
        .pipeline
        .run_with_timeout(&request, state.run_timeout, |stage| steps.push(stage.label()))
        .await
        .map_err(|e| map_pipeline_error(rid, &e))?;

    let summary = result.research_summary();
    Ok(Json(ApiResponse {
        data: PitchResponse {
            pitch: result.pitch,
            research: PitchResearch {
                brand: result.brand,
                competitors: result.competitors,
            },
            summary,
            steps,
            run_id: result.run_id,
            generated_at: result.generated_at,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/pitch/status: state of the current or most recent run.
pub(super) async fn pitch_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<PitchStatus>> {
    Json(ApiResponse {
        data: PitchStatus::from(state.pipeline.state()),
        meta: ResponseMeta::new(req_id.0),
    })
}

fn map_pipeline_error(request_id: &str, error: &PipelineError) -> ApiError {
    match error {
        PipelineError::Busy => ApiError::new(request_id, "conflict", error.to_string()),
        PipelineError::Generation { stage, source } => {
            tracing::error!(stage = %stage, error = %source, "pitch generation failed");
            ApiError::new(request_id, "upstream_error", error.display_message())
        }
        PipelineError::TimedOut { secs } => {
            tracing::error!(secs, "pitch run timed out");
            ApiError::new(request_id, "timeout", error.display_message())
        }
    }
}
