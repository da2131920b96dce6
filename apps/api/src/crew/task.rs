use serde::Serialize;

/// One unit of work in a crew.
///
/// `agent` indexes the crew's agent list. `context` lists earlier tasks whose
/// outputs are handed to this one; when empty, the immediately preceding
/// task's output (if any) is used instead.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub agent: usize,
    pub context: Vec<usize>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: usize,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Vec<usize>) -> Self {
        self.context = context;
        self
    }

    /// Builds the user prompt, given the outputs of the context tasks as
    /// `(task name, output)` pairs.
    pub fn prompt(&self, context_outputs: &[(&str, &str)]) -> String {
        let mut prompt = format!(
            "{description}\n\nThis is the expected criteria for your final answer: {expected}\n\
             You MUST return the actual complete content as the final answer, not a summary.",
            description = self.description,
            expected = self.expected_output,
        );

        if !context_outputs.is_empty() {
            prompt.push_str("\n\nThis is the context you're working with:\n");
            for (name, output) in context_outputs {
                prompt.push_str(&format!("\n### {name}\n{output}\n"));
            }
        }

        prompt
    }
}
