use crate::application::poller::PollPolicy;
use crate::error::{PollerError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Poller settings, loadable from a JSON file. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollerConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub initial_delay_ms: u64,
    pub delay_increment_ms: u64,
    pub deadline_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        let policy = PollPolicy::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: 15_000,
            initial_delay_ms: policy.initial_delay.as_millis() as u64,
            delay_increment_ms: policy.increment.as_millis() as u64,
            deadline_ms: policy.deadline.as_millis() as u64,
        }
    }
}

impl PollerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| PollerError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(PollerError::Config("api_base_url must not be empty".to_string()));
        }
        if self.initial_delay_ms == 0 {
            return Err(PollerError::Config("initial_delay_ms must be positive".to_string()));
        }
        if self.deadline_ms == 0 {
            return Err(PollerError::Config("deadline_ms must be positive".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(PollerError::Config(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn policy(&self) -> PollPolicy {
        PollPolicy {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            increment: Duration::from_millis(self.delay_increment_ms),
            deadline: Duration::from_millis(self.deadline_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
