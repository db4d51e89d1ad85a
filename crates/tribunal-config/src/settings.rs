//! Configuration schema.
//!
//! Every field has a default, so an empty document yields the baseline
//! behavior: Groq's OpenAI-compatible endpoint, `llama3-70b-8192`, no retry.
//!
//! ```toml
//! [provider]
//! model = "llama3-70b-8192"
//! temperature = 0.7
//!
//! [runtime]
//! concurrency = 4
//! call_timeout_secs = 60
//!
//! [transcript]
//! summary_window = 10
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TribunalConfig {
    pub provider: ProviderSettings,
    pub runtime: RuntimeSettings,
    pub transcript: TranscriptSettings,
}

/// The chat-completion endpoint and sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    /// Base URL of an OpenAI-compatible API; `chat/completions` is appended.
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Client-side request ceiling shared by every in-flight trial. Requests
    /// are spaced evenly, one every `60s / requests_per_minute`.
    pub requests_per_minute: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            requests_per_minute: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSettings {
    /// Trials run at the same time.
    pub concurrency: usize,
    /// Per completion call; `0` disables the timeout.
    pub call_timeout_secs: u64,
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each further retry.
    pub retry_backoff_ms: u64,
    /// Shorter case descriptions are rejected without a trial.
    pub min_description_chars: usize,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            concurrency: 4,
            call_timeout_secs: 60,
            max_retries: 0,
            retry_backoff_ms: 500,
            min_description_chars: tribunal_contracts::case::MIN_DESCRIPTION_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranscriptSettings {
    /// Entries included in the summaries shown to closing counsel and the judge.
    pub summary_window: usize,
    pub summary_truncate_chars: usize,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            summary_window: 10,
            summary_truncate_chars: 100,
        }
    }
}
