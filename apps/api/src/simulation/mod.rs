// Interview simulation: job tracking, the interview crew, the background worker,
// and the HTTP handlers that drive them.
// All LLM calls go through llm_client; this module never talks to the provider directly.

pub mod handlers;
pub mod job;
pub mod prompts;
pub mod roster;
pub mod runner;
