//! Job tracker — owns the single progress record and enforces single-flight runs.
//!
//! Every read and write goes through one `tokio::sync::Mutex`. A run is
//! identified by the `Uuid` handed out by `start`; worker updates carrying any
//! other id are dropped, so an aborted or superseded worker can never
//! overwrite the record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::AssessmentResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Idle,
    Running,
    Completed,
    Error,
}

/// The record polled by clients. Construct through the named constructors so
/// that `result` is present exactly when `status` is `Completed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub status: JobStatus,
    pub step: String,
    pub progress: u8,
    pub result: Option<AssessmentResult>,
}

impl ProgressRecord {
    pub fn idle() -> Self {
        Self {
            status: JobStatus::Idle,
            step: String::new(),
            progress: 0,
            result: None,
        }
    }

    pub fn running(step: impl Into<String>, progress: u8) -> Self {
        Self {
            status: JobStatus::Running,
            step: step.into(),
            progress: progress.min(99),
            result: None,
        }
    }

    pub fn completed(result: AssessmentResult) -> Self {
        Self {
            status: JobStatus::Completed,
            step: "Assessment Complete!".to_string(),
            progress: 100,
            result: Some(result),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            status: JobStatus::Error,
            step: format!("Error: {message}"),
            progress: 0,
            result: None,
        }
    }
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self::idle()
    }
}

/// Step label and percentage written when a run is accepted.
pub const INITIAL_STEP: &str = "Initializing...";
pub const INITIAL_PROGRESS: u8 = 10;

#[derive(Default)]
struct TrackerInner {
    record: ProgressRecord,
    run_id: Option<Uuid>,
    abort: Option<AbortHandle>,
}

impl TrackerInner {
    fn owns(&self, run_id: Uuid) -> bool {
        self.run_id == Some(run_id) && self.record.status == JobStatus::Running
    }
}

/// Cheap to clone; all clones share one record.
#[derive(Clone, Default)]
pub struct JobTracker {
    inner: Arc<Mutex<TrackerInner>>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current record, verbatim.
    pub async fn snapshot(&self) -> ProgressRecord {
        self.inner.lock().await.record.clone()
    }

    /// Starts a new run and its worker. Rejected while another run is in
    /// flight; any finished run (and its undownloaded result) is replaced.
    ///
    /// `spawn_worker` is called with the new run id while the lock is held, so
    /// the worker's abort handle is registered before any `cancel` can observe
    /// the running record.
    pub async fn start<F>(&self, spawn_worker: F) -> Result<Uuid, AppError>
    where
        F: FnOnce(Uuid) -> AbortHandle,
    {
        let mut inner = self.inner.lock().await;
        if inner.record.status == JobStatus::Running {
            return Err(AppError::Conflict(
                "A simulation is already running; wait for it to finish or cancel it".to_string(),
            ));
        }

        if inner.record.status == JobStatus::Completed {
            debug!("Discarding previous completed assessment");
        }

        let run_id = Uuid::new_v4();
        inner.run_id = Some(run_id);
        inner.record = ProgressRecord::running(INITIAL_STEP, INITIAL_PROGRESS);
        inner.abort = Some(spawn_worker(run_id));
        info!("Simulation run {run_id} accepted");
        Ok(run_id)
    }

    /// Moves a running job to a new checkpoint. Ignored for stale runs.
    pub async fn checkpoint(&self, run_id: Uuid, step: impl Into<String>, progress: u8) {
        let mut inner = self.inner.lock().await;
        if !inner.owns(run_id) {
            return;
        }
        let step = step.into();
        debug!("Run {run_id}: {progress}% {step}");
        inner.record = ProgressRecord::running(step, progress);
    }

    pub async fn complete(&self, run_id: Uuid, result: AssessmentResult) {
        let mut inner = self.inner.lock().await;
        if !inner.owns(run_id) {
            warn!("Dropping result of stale run {run_id}");
            return;
        }
        inner.abort = None;
        inner.record = ProgressRecord::completed(result);
        info!("Simulation run {run_id} completed");
    }

    pub async fn fail(&self, run_id: Uuid, message: &str) {
        let mut inner = self.inner.lock().await;
        if !inner.owns(run_id) {
            return;
        }
        inner.abort = None;
        inner.record = ProgressRecord::failed(message);
        warn!("Simulation run {run_id} failed: {message}");
    }

    /// Aborts the running worker, if any, and records the cancellation.
    pub async fn cancel(&self) -> Result<(), AppError> {
        let mut inner = self.inner.lock().await;
        if inner.record.status != JobStatus::Running {
            return Err(AppError::Conflict(
                "No simulation is currently running".to_string(),
            ));
        }
        if let Some(abort) = inner.abort.take() {
            abort.abort();
        }
        let run_id = inner.run_id.take();
        inner.record = ProgressRecord::failed("Simulation cancelled");
        info!("Simulation run {run_id:?} cancelled");
        Ok(())
    }

    /// The result of the last run, if it completed.
    pub async fn completed_result(&self) -> Result<AssessmentResult, AppError> {
        let inner = self.inner.lock().await;
        match (&inner.record.status, &inner.record.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            _ => Err(AppError::NotFound(
                "No completed assessment available".to_string(),
            )),
        }
    }
}
