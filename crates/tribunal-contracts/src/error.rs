//! Error types for the trial engine.
//!
//! All fallible operations return `TribunalResult<T>`. Completion providers
//! report their own `CompletionError`, which the agent layer folds into
//! `TribunalError::AgentCompletion`.

use thiserror::Error;

/// The unified error type for the trial engine.
#[derive(Debug, Error)]
pub enum TribunalError {
    /// The completion capability failed or returned unusable output for one call.
    #[error("agent '{agent}' failed to complete: {reason}")]
    AgentCompletion { agent: String, reason: String },

    /// A case record lacks usable description text.
    #[error("case '{case_id}' is malformed: {reason}")]
    MalformedInput { case_id: String, reason: String },

    /// No agent is registered under the requested speaker id.
    #[error("no agent registered for '{speaker}'")]
    AgentNotFound { speaker: String },

    /// A phase was run out of order or twice.
    #[error("state machine error: {reason}")]
    StateMachine { reason: String },

    /// The transcript could not record an entry.
    #[error("transcript write failed: {reason}")]
    TranscriptWriteFailed { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// Reading case records or writing verdicts failed.
    #[error("case I/O error: {reason}")]
    CaseIo { reason: String },
}

pub type TribunalResult<T> = Result<T, TribunalError>;

/// Failure of a single call to an external completion provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    #[error("request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("completion timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
}

impl CompletionError {
    /// True when retrying the same request may succeed.
    ///
    /// Rate limits, timeouts, transport failures (status 0) and 5xx
    /// responses are transient. 4xx responses and unparseable bodies are not.
    pub fn is_transient(&self) -> bool {
        match self {
            CompletionError::RateLimited { .. } | CompletionError::Timeout { .. } => true,
            CompletionError::RequestFailed { status, .. } => *status == 0 || *status >= 500,
            CompletionError::InvalidResponse { .. } => false,
        }
    }
}
