// Shared prompt constants used outside a single crew.
// Interview-specific prompts live in simulation/prompts.rs.

/// System prompt for the connectivity probe.
pub const CONNECTION_TEST_SYSTEM: &str = "You are a helpful assistant.";

/// User prompt for the connectivity probe.
pub const CONNECTION_TEST_PROMPT: &str = "Say 'Connection successful!'";

/// Appended to every agent's system prompt.
pub const REPORT_STYLE_INSTRUCTION: &str = "\
    Write in clear, professional markdown. \
    Use headings and bullet points where they aid scanning. \
    Base every judgement on the material you were given and say so when evidence is thin.";
