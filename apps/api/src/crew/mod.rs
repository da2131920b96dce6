//! Crew — a small sequential multi-agent runner.
//!
//! A crew is a fixed list of agents and an ordered list of tasks. `kickoff`
//! executes the tasks one after another, each as a single chat completion in
//! the assigned agent's persona, feeding earlier outputs forward as context.
//! There is no delegation and no parallelism.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::llm_client::{ChatModel, CompletionRequest, LlmError, ModelProfile};

pub mod agent;
pub mod task;

pub use agent::Agent;
pub use task::Task;

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("Invalid crew plan: {0}")]
    InvalidPlan(String),

    #[error("Task '{task}' failed: {source}")]
    Llm {
        task: String,
        #[source]
        source: LlmError,
    },

    #[error("Task '{task}' produced no output")]
    EmptyOutput { task: String },
}

/// Output of a single task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskOutput {
    pub task: String,
    pub agent_role: String,
    pub raw: String,
}

/// Output of a full crew run. `raw` is the last task's output.
#[derive(Debug, Clone, Serialize)]
pub struct CrewOutput {
    pub raw: String,
    pub tasks_output: Vec<TaskOutput>,
}

/// Hook for callers that want to know which task is executing.
#[async_trait]
pub trait CrewObserver: Send + Sync {
    async fn task_started(&self, index: usize, total: usize, task: &Task, agent: &Agent);
}

#[derive(Debug, Clone)]
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
}

impl Crew {
    /// Assembles a crew, rejecting plans that cannot run sequentially:
    /// no tasks, unknown agents, or context that points at the same or a later task.
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>) -> Result<Self, CrewError> {
        if tasks.is_empty() {
            return Err(CrewError::InvalidPlan("crew has no tasks".to_string()));
        }

        for (index, task) in tasks.iter().enumerate() {
            if task.agent >= agents.len() {
                return Err(CrewError::InvalidPlan(format!(
                    "task '{}' is assigned to agent #{} but the crew has {} agents",
                    task.name,
                    task.agent,
                    agents.len()
                )));
            }
            if let Some(bad) = task.context.iter().find(|&&c| c >= index) {
                return Err(CrewError::InvalidPlan(format!(
                    "task '{}' takes context from task #{bad}, which does not run before it",
                    task.name
                )));
            }
        }

        Ok(Self { agents, tasks })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Runs every task in order. Stops at the first failure.
    pub async fn kickoff(
        &self,
        model: &dyn ChatModel,
        api_key: &str,
        observer: &dyn CrewObserver,
    ) -> Result<CrewOutput, CrewError> {
        let total = self.tasks.len();
        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(total);

        for (index, task) in self.tasks.iter().enumerate() {
            let agent = &self.agents[task.agent];
            observer.task_started(index, total, task, agent).await;
            info!(
                "Crew task {}/{} '{}' started (agent: {})",
                index + 1,
                total,
                task.name,
                agent.role
            );

            let context_outputs: Vec<(&str, &str)> = if task.context.is_empty() {
                outputs
                    .last()
                    .map(|o| vec![(o.task.as_str(), o.raw.as_str())])
                    .unwrap_or_default()
            } else {
                task.context
                    .iter()
                    .map(|&c| (outputs[c].task.as_str(), outputs[c].raw.as_str()))
                    .collect()
            };

            let request = CompletionRequest {
                profile: ModelProfile::Assessment,
                system: agent.system_prompt(),
                prompt: task.prompt(&context_outputs),
            };

            let raw = model
                .complete(api_key, request)
                .await
                .map_err(|source| CrewError::Llm {
                    task: task.name.clone(),
                    source,
                })?;

            if raw.trim().is_empty() {
                return Err(CrewError::EmptyOutput {
                    task: task.name.clone(),
                });
            }

            debug!("Crew task '{}' produced {} chars", task.name, raw.len());

            outputs.push(TaskOutput {
                task: task.name.clone(),
                agent_role: agent.role.clone(),
                raw,
            });
        }

        // Non-empty by construction: `new` rejects a crew without tasks.
        let raw = outputs
            .last()
            .map(|o| o.raw.clone())
            .unwrap_or_default();

        Ok(CrewOutput {
            raw,
            tasks_output: outputs,
        })
    }
}
