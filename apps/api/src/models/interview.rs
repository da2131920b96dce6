use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The role being interviewed for.
///
/// Only `position` is required. Unknown fields sent by the client are kept
/// in `extra` and written back out unchanged in the JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    pub position: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub tech_stack: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobDetails {
    /// Tech stack for agent personas, with a neutral fallback when none was given.
    pub fn tech_stack_or_default(&self) -> &str {
        if self.tech_stack.trim().is_empty() {
            "modern technologies"
        } else {
            &self.tech_stack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateInfo {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything one simulation run needs besides the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewRequest {
    pub job_details: JobDetails,
    pub candidate_info: CandidateInfo,
    #[serde(default)]
    pub hr_responses: String,
    #[serde(default)]
    pub tech_responses: String,
}

/// Output of one crew stage, kept alongside the final synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: String,
    pub agent_role: String,
    pub output: String,
}

/// The finished assessment. Written once by the worker, read by export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Final synthesis text produced by the last stage.
    pub assessment: String,
    pub candidate_info: CandidateInfo,
    pub job_details: JobDetails,
    /// Local time the result was created, `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Report file stem, without extension.
    pub filename: String,
    #[serde(default)]
    pub stage_reports: Vec<StageReport>,
}
