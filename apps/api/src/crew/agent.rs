use serde::Serialize;

use crate::llm_client::prompts::REPORT_STYLE_INSTRUCTION;

/// A persona the model is asked to play while working on a task.
#[derive(Debug, Clone, Serialize)]
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl Agent {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// System prompt that puts the model in this agent's shoes.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}. {backstory}\n\nYour personal goal is: {goal}\n\n{style}",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal,
            style = REPORT_STYLE_INSTRUCTION,
        )
    }
}
