use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_REPORTS_DIR: &str = "reports";
const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4";
const DEFAULT_LLM_TEST_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_SIMULATION_TIMEOUT_SECS: u64 = 600;

/// Application configuration loaded from environment variables.
///
/// Nothing is required: the LLM credential arrives with each request, so every
/// variable has a default. Malformed numbers still fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory exported reports are written to. Created on demand.
    pub reports_dir: PathBuf,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_test_model: String,
    /// Upper bound on a whole crew run, in seconds.
    pub simulation_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let simulation_timeout_secs = match lookup("SIMULATION_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SIMULATION_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_SIMULATION_TIMEOUT_SECS,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            reports_dir: lookup("REPORTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORTS_DIR)),
            llm_base_url: lookup("LLM_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_test_model: lookup("LLM_TEST_MODEL")
                .unwrap_or_else(|| DEFAULT_LLM_TEST_MODEL.to_string()),
            simulation_timeout_secs,
        })
    }
}
