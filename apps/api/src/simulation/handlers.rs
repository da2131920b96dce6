//! Axum route handlers for the Simulation API.

use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{CONNECTION_TEST_PROMPT, CONNECTION_TEST_SYSTEM};
use crate::llm_client::{CompletionRequest, ModelProfile};
use crate::models::interview::InterviewRequest;
use crate::report::{export_report, ExportFormat};
use crate::simulation::job::ProgressRecord;
use crate::simulation::runner::spawn_simulation;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// `interview_data` stays untyped here so the credential is checked first and
/// shape errors come back as validation errors.
#[derive(Debug, Deserialize)]
pub struct StartSimulationRequest {
    pub api_key: Option<String>,
    pub interview_data: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TestConnectionRequest {
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TestConnectionResponse {
    pub message: String,
    pub test_response: String,
}

/// Rejects a missing or blank credential.
fn require_api_key(api_key: Option<String>) -> Result<String, AppError> {
    api_key
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::Validation("API key is required".to_string()))
}

fn parse_interview_data(raw: Option<Value>) -> Result<InterviewRequest, AppError> {
    let raw = raw
        .filter(|v| !v.is_null())
        .ok_or_else(|| AppError::Validation("interview_data is required".to_string()))?;
    serde_json::from_value(raw)
        .map_err(|e| AppError::Validation(format!("Invalid interview_data: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/start_simulation
///
/// Validates the submission and starts a background run. Returns immediately;
/// progress is observed through GET /api/progress.
pub async fn handle_start_simulation(
    State(state): State<AppState>,
    Json(request): Json<StartSimulationRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let api_key = require_api_key(request.api_key)?;
    let interview = parse_interview_data(request.interview_data)?;

    if interview.candidate_info.name.trim().is_empty() {
        return Err(AppError::Validation(
            "candidate_info.name cannot be empty".to_string(),
        ));
    }
    if interview.job_details.position.trim().is_empty() {
        return Err(AppError::Validation(
            "job_details.position cannot be empty".to_string(),
        ));
    }

    let run_id = spawn_simulation(
        &state.jobs,
        state.llm.clone(),
        Duration::from_secs(state.config.simulation_timeout_secs),
        api_key,
        interview,
    )
    .await?;
    info!("Started simulation run {run_id}");

    Ok(Json(MessageResponse {
        message: "Simulation started successfully".to_string(),
    }))
}

/// GET /api/progress
pub async fn handle_progress(State(state): State<AppState>) -> Json<ProgressRecord> {
    Json(state.jobs.snapshot().await)
}

/// POST /api/cancel_simulation
pub async fn handle_cancel_simulation(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.jobs.cancel().await?;
    Ok(Json(MessageResponse {
        message: "Simulation cancelled".to_string(),
    }))
}

/// GET /api/download/:format
///
/// Writes the completed assessment to the reports directory and streams it back
/// as an attachment. The format is checked before the job state.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let format = ExportFormat::parse(&format)?;
    let result = state.jobs.completed_result().await?;

    let file = export_report(&state.config.reports_dir, &result, format).await?;
    info!("Serving report {}", file.path.display());

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.download_name),
            ),
        ],
        file.body,
    ))
}

/// POST /api/test_connection
///
/// Sends a tiny prompt with the supplied key to confirm the provider accepts it.
pub async fn handle_test_connection(
    State(state): State<AppState>,
    Json(request): Json<TestConnectionRequest>,
) -> Result<Json<TestConnectionResponse>, AppError> {
    let api_key = require_api_key(request.api_key)?;

    let test_response = state
        .llm
        .complete(
            &api_key,
            CompletionRequest {
                profile: ModelProfile::ConnectionTest,
                system: CONNECTION_TEST_SYSTEM.to_string(),
                prompt: CONNECTION_TEST_PROMPT.to_string(),
            },
        )
        .await
        .map_err(|e| AppError::ConnectionFailed(e.to_string()))?;

    Ok(Json(TestConnectionResponse {
        message: "Connection successful!".to_string(),
        test_response,
    }))
}
