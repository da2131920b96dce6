//! Simulation worker — runs the interview crew for one accepted submission.
//!
//! Flow: start (spawns the worker) → agents → tasks → crew → kickoff (bounded by the
//! configured timeout) → assemble AssessmentResult → complete.
//! Any failure lands in the tracker as an `error` record; nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::crew::{Agent, Crew, CrewError, CrewObserver, Task};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::models::interview::{AssessmentResult, InterviewRequest, StageReport};
use crate::report::{report_filename, TIMESTAMP_FORMAT};
use crate::simulation::job::JobTracker;
use crate::simulation::roster::{interview_agents, interview_tasks};

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Crew(#[from] CrewError),

    #[error("Simulation timed out after {secs} seconds")]
    TimedOut { secs: u64 },
}

/// Accepts a submission and starts its worker. Returns the run id.
///
/// Fails with `Conflict` while another run is in flight. The credential is
/// owned by the spawned task and never leaves it.
pub async fn spawn_simulation(
    jobs: &JobTracker,
    model: Arc<dyn ChatModel>,
    timeout: Duration,
    api_key: String,
    request: InterviewRequest,
) -> Result<Uuid, AppError> {
    let worker_jobs = jobs.clone();
    jobs.start(move |run_id| {
        tokio::spawn(run_simulation(
            worker_jobs,
            model,
            timeout,
            run_id,
            api_key,
            request,
        ))
        .abort_handle()
    })
    .await
}

/// Worker body. Writes the terminal state itself; never returns an error.
pub async fn run_simulation(
    jobs: JobTracker,
    model: Arc<dyn ChatModel>,
    timeout: Duration,
    run_id: Uuid,
    api_key: String,
    request: InterviewRequest,
) {
    match execute(&jobs, model.as_ref(), timeout, run_id, &api_key, &request).await {
        Ok(result) => jobs.complete(run_id, result).await,
        Err(e) => {
            error!("Simulation run {run_id} failed: {e}");
            jobs.fail(run_id, &e.to_string()).await;
        }
    }
}

async fn execute(
    jobs: &JobTracker,
    model: &dyn ChatModel,
    timeout: Duration,
    run_id: Uuid,
    api_key: &str,
    request: &InterviewRequest,
) -> Result<AssessmentResult, SimulationError> {
    jobs.checkpoint(run_id, "Creating AI Agents...", 20).await;
    let agents = interview_agents(&request.job_details);
    jobs.checkpoint(run_id, "Agents Created Successfully", 30).await;

    jobs.checkpoint(run_id, "Creating Interview Tasks...", 40).await;
    let tasks = interview_tasks(request);
    jobs.checkpoint(run_id, "Tasks Created Successfully", 50).await;

    jobs.checkpoint(run_id, "Starting Interview Simulation...", 60).await;

    jobs.checkpoint(run_id, "Assembling Interview Crew...", 70).await;
    let crew = Crew::new(agents, tasks)?;

    jobs.checkpoint(run_id, "Running Multi-Agent Assessment...", 80).await;
    info!(
        "Run {run_id}: kicking off {} crew tasks for {}",
        crew.tasks().len(),
        request.candidate_info.name
    );
    let observer = ProgressObserver {
        jobs: jobs.clone(),
        run_id,
    };
    let output = tokio::time::timeout(timeout, crew.kickoff(model, api_key, &observer))
        .await
        .map_err(|_| SimulationError::TimedOut {
            secs: timeout.as_secs(),
        })??;

    jobs.checkpoint(run_id, "Generating Report...", 90).await;

    let created_at = Local::now();
    Ok(AssessmentResult {
        assessment: output.raw,
        candidate_info: request.candidate_info.clone(),
        job_details: request.job_details.clone(),
        timestamp: created_at.format(TIMESTAMP_FORMAT).to_string(),
        filename: report_filename(
            &request.candidate_info.name,
            &request.job_details.position,
            &created_at,
        ),
        stage_reports: output
            .tasks_output
            .into_iter()
            .map(|t| StageReport {
                stage: t.task,
                agent_role: t.agent_role,
                output: t.raw,
            })
            .collect(),
    })
}

/// Relabels the 80% checkpoint with the stage currently running.
struct ProgressObserver {
    jobs: JobTracker,
    run_id: Uuid,
}

#[async_trait]
impl CrewObserver for ProgressObserver {
    async fn task_started(&self, index: usize, total: usize, _task: &Task, agent: &Agent) {
        self.jobs
            .checkpoint(
                self.run_id,
                format!(
                    "Running Multi-Agent Assessment ({}/{}: {})...",
                    index + 1,
                    total,
                    agent.role
                ),
                80,
            )
            .await;
    }
}
