//! Loading and validation.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use tribunal_contracts::error::{TribunalError, TribunalResult};
use tribunal_core::{CallPolicy, SummaryWindow};

use crate::settings::TribunalConfig;

impl TribunalConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `TribunalError::Config` if the TOML is malformed, names an
    /// unknown key, or fails validation.
    pub fn from_toml_str(s: &str) -> TribunalResult<Self> {
        let config: TribunalConfig = toml::from_str(s).map_err(|e| TribunalError::Config {
            reason: format!("failed to parse configuration TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as configuration.
    pub fn from_file(path: &Path) -> TribunalResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TribunalError::Config {
            reason: format!("failed to read configuration file '{}': {}", path.display(), e),
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), model = %config.provider.model, "configuration loaded");
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> TribunalResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> TribunalResult<()> {
        let provider = &self.provider;
        if provider.base_url.trim().is_empty() {
            return Err(invalid("provider.base_url must not be empty"));
        }
        if provider.model.trim().is_empty() {
            return Err(invalid("provider.model must not be empty"));
        }
        if !(0.0..=2.0).contains(&provider.temperature) {
            return Err(invalid(format!(
                "provider.temperature must be within [0, 2], got {}",
                provider.temperature
            )));
        }
        if provider.max_tokens == 0 {
            return Err(invalid("provider.max_tokens must be at least 1"));
        }
        if self.runtime.concurrency == 0 {
            return Err(invalid("runtime.concurrency must be at least 1"));
        }
        if self.transcript.summary_window == 0 {
            return Err(invalid("transcript.summary_window must be at least 1"));
        }
        Ok(())
    }

    /// The per-call guard every agent applies around its completions.
    pub fn call_policy(&self) -> CallPolicy {
        let runtime = &self.runtime;
        CallPolicy {
            timeout: (runtime.call_timeout_secs > 0)
                .then(|| Duration::from_secs(runtime.call_timeout_secs)),
            max_retries: runtime.max_retries,
            backoff: Duration::from_millis(runtime.retry_backoff_ms),
        }
    }

    pub fn summary_window(&self) -> SummaryWindow {
        SummaryWindow {
            entries: self.transcript.summary_window,
            truncate_chars: self.transcript.summary_truncate_chars,
        }
    }
}

fn invalid(reason: impl Into<String>) -> TribunalError {
    TribunalError::Config {
        reason: reason.into(),
    }
}
