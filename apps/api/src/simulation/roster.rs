//! The interview crew: three personas and the three tasks they perform.

use crate::crew::{Agent, Task};
use crate::models::interview::{InterviewRequest, JobDetails};
use crate::simulation::prompts::*;

pub const HR_AGENT: usize = 0;
pub const TECH_AGENT: usize = 1;
pub const DIRECTOR_AGENT: usize = 2;

const HR_TASK: usize = 0;
const TECH_TASK: usize = 1;

pub const HR_STAGE: &str = "hr_assessment";
pub const TECH_STAGE: &str = "technical_assessment";
pub const FINAL_STAGE: &str = "final_assessment";

/// Agents in index order: HR specialist, technical lead, assessment director.
pub fn interview_agents(job: &JobDetails) -> Vec<Agent> {
    vec![
        Agent::new(
            HR_ROLE,
            HR_GOAL_TEMPLATE.replace("{position}", &job.position),
            HR_BACKSTORY,
        ),
        Agent::new(
            TECH_ROLE,
            TECH_GOAL_TEMPLATE.replace("{position}", &job.position),
            TECH_BACKSTORY_TEMPLATE.replace("{tech_stack}", job.tech_stack_or_default()),
        ),
        Agent::new(DIRECTOR_ROLE, DIRECTOR_GOAL, DIRECTOR_BACKSTORY),
    ]
}

/// Tasks in execution order. The technical stage sees the HR output as
/// context; the final stage reads both.
pub fn interview_tasks(request: &InterviewRequest) -> Vec<Task> {
    let name = &request.candidate_info.name;
    let job = &request.job_details;

    let hr = Task::new(
        HR_STAGE,
        HR_TASK_TEMPLATE
            .replace("{name}", name)
            .replace("{position}", &job.position)
            .replace("{hr_responses}", or_placeholder(&request.hr_responses)),
        HR_EXPECTED_OUTPUT,
        HR_AGENT,
    );

    let tech = Task::new(
        TECH_STAGE,
        TECH_TASK_TEMPLATE
            .replace("{name}", name)
            .replace("{position}", &job.position)
            .replace("{tech_stack}", job.tech_stack_or_default())
            .replace("{tech_responses}", or_placeholder(&request.tech_responses)),
        TECH_EXPECTED_OUTPUT,
        TECH_AGENT,
    );

    let final_task = Task::new(
        FINAL_STAGE,
        FINAL_TASK_TEMPLATE.replace("{name}", name),
        FINAL_EXPECTED_OUTPUT,
        DIRECTOR_AGENT,
    )
    .with_context(vec![HR_TASK, TECH_TASK]);

    vec![hr, tech, final_task]
}

fn or_placeholder(text: &str) -> &str {
    if text.trim().is_empty() {
        NO_RESPONSES
    } else {
        text
    }
}
