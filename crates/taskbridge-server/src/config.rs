//! Server configuration.

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind address.
    pub bind_addr: String,

    /// Model provider credential. Structuring is disabled when absent.
    pub model_api_key: Option<String>,

    /// Model name.
    pub model: String,

    /// Model provider base URL.
    pub model_base_url: String,

    /// Downstream executor base URL.
    pub downstream_url: String,

    /// How long shutdown waits for in-flight forwards (seconds).
    pub shutdown_grace_secs: u64,
}

impl Config {
    /// Returns true if a usable model credential is configured.
    pub fn structuring_enabled(&self) -> bool {
        self.model_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:4100".to_string(),
            model_api_key: None,
            model: "gpt-4.1-mini".to_string(),
            model_base_url: "https://api.openai.com/v1".to_string(),
            downstream_url: "http://localhost:4000".to_string(),
            shutdown_grace_secs: 10,
        }
    }
}
