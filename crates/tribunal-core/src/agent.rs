//! The conversational agent: a persona plus its private, append-only history.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use tribunal_contracts::{
    conversation::{CompletionRequest, ConversationEntry},
    error::{CompletionError, TribunalError, TribunalResult},
    role::RoleTag,
};

use crate::traits::CompletionProvider;

/// How an agent guards each call to the completion provider.
///
/// The default is the baseline behavior: no timeout and no retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallPolicy {
    /// Upper bound on a single attempt. Exceeding it is a `Timeout` failure.
    pub timeout: Option<Duration>,
    /// Additional attempts allowed after a transient failure.
    pub max_retries: u32,
    /// Delay before the first retry; doubled for every further retry.
    pub backoff: Duration,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout: None,
            max_retries: 0,
            backoff: Duration::from_millis(500),
        }
    }
}

/// One participant in the trial.
///
/// History grows only in (user, assistant) pairs, appended together after
/// a completion succeeds. A failed call leaves history untouched.
pub struct ConversationalAgent {
    name: String,
    role: RoleTag,
    persona: String,
    history: Vec<ConversationEntry>,
    provider: Arc<dyn CompletionProvider>,
    policy: CallPolicy,
}

impl ConversationalAgent {
    /// Create an agent. The persona is trimmed.
    ///
    /// # Errors
    ///
    /// `TribunalError::Config` if the persona is empty after trimming.
    pub fn new(
        name: impl Into<String>,
        role: RoleTag,
        persona: impl Into<String>,
        provider: Arc<dyn CompletionProvider>,
    ) -> TribunalResult<Self> {
        let name = name.into();
        let persona = persona.into().trim().to_string();
        if persona.is_empty() {
            return Err(TribunalError::Config {
                reason: format!("agent '{}' has an empty persona", name),
            });
        }
        Ok(Self::seated(name, role, persona, provider))
    }

    /// An agent with one of the built-in personas, which are never empty.
    pub(crate) fn seated(
        name: String,
        role: RoleTag,
        persona: String,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            name,
            role,
            persona,
            history: Vec::new(),
            provider,
            policy: CallPolicy::default(),
        }
    }

    pub fn with_call_policy(mut self, policy: CallPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> RoleTag {
        self.role
    }

    pub fn persona(&self) -> &str {
        &self.persona
    }

    pub fn history(&self) -> &[ConversationEntry] {
        &self.history
    }

    /// Answer `input` in character, given everything this agent has said
    /// and heard before.
    ///
    /// # Errors
    ///
    /// `TribunalError::AgentCompletion` if `input` is empty or the provider
    /// fails after all permitted attempts. History is unchanged on error.
    pub async fn respond(&mut self, input: &str) -> TribunalResult<String> {
        if input.is_empty() {
            return Err(TribunalError::AgentCompletion {
                agent: self.name.clone(),
                reason: "input must not be empty".to_string(),
            });
        }

        let request = CompletionRequest {
            speaker: self.name.clone(),
            persona: self.persona.clone(),
            history: self.history.clone(),
            input: input.to_string(),
        };

        debug!(
            agent = %self.name,
            role = %self.role,
            history_len = self.history.len(),
            provider = self.provider.provider_name(),
            "requesting completion"
        );

        let output = self
            .complete_with_policy(&request)
            .await
            .map_err(|e| TribunalError::AgentCompletion {
                agent: self.name.clone(),
                reason: e.to_string(),
            })?;

        self.history.push(ConversationEntry::user(request.input));
        self.history.push(ConversationEntry::assistant(output.clone()));
        Ok(output)
    }

    async fn complete_with_policy(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let mut attempt: u32 = 0;
        let mut delay = self.policy.backoff;

        loop {
            let result = match self.policy.timeout {
                Some(limit) => {
                    match tokio::time::timeout(limit, self.provider.complete(request)).await {
                        Ok(result) => result,
                        Err(_) => Err(CompletionError::Timeout {
                            after_ms: limit.as_millis() as u64,
                        }),
                    }
                }
                None => self.provider.complete(request).await,
            };

            match result {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < self.policy.max_retries => {
                    attempt += 1;
                    let wait = match &e {
                        CompletionError::RateLimited { retry_after_ms, .. } => {
                            delay.max(Duration::from_millis(*retry_after_ms))
                        }
                        _ => delay,
                    };
                    warn!(
                        agent = %self.name,
                        attempt,
                        max_retries = self.policy.max_retries,
                        wait_ms = wait.as_millis() as u64,
                        error = %e,
                        "transient completion failure, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    delay = delay.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl std::fmt::Debug for ConversationalAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationalAgent")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("history_len", &self.history.len())
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
