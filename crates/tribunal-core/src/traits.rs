//! Trait seams of the trial engine.
//!
//! - `CompletionProvider` is untrusted and external (may be a remote LLM)
//! - `TranscriptLog`      records every statement, in order, immutably
//! - `WitnessStrategy`    decides who testifies during examination
//!
//! The orchestrator wires them together. Agents never talk to each other;
//! all cross-agent information flows through prompts the orchestrator builds.

use std::sync::Arc;

use async_trait::async_trait;

use tribunal_contracts::{
    case::AdmittedCase,
    conversation::CompletionRequest,
    error::{CompletionError, TribunalResult},
    trial::{TranscriptEntry, TrialId},
};

use crate::witness::WitnessSpec;

/// The external capability that turns persona + history + input into text.
///
/// One provider instance is shared by every agent of every in-flight trial,
/// so implementations must be safe for concurrent use.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Produce the assistant reply for `request`.
    ///
    /// Must not retain or mutate any conversation state; the calling agent
    /// owns its history.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;

    /// Short provider name for logs (e.g. "groq", "scripted").
    fn provider_name(&self) -> &str;
}

/// The authoritative, append-only record of a trial.
///
/// Appending also emits a human-readable line to the operator log. That
/// emission is best-effort and never fails the append.
pub trait TranscriptLog: Send + Sync {
    /// Append one entry. Entries are never modified or removed afterwards.
    fn append(&self, entry: TranscriptEntry) -> TribunalResult<()>;

    /// The most recent `n` entries, oldest first.
    fn recent(&self, n: usize) -> Vec<TranscriptEntry>;

    /// Every entry, in chronological order.
    fn entries(&self) -> Vec<TranscriptEntry>;

    /// Mark the trial as concluded. Called once, after the verdict.
    fn seal(&self, trial_id: &TrialId) -> TribunalResult<()>;
}

impl<T: TranscriptLog + ?Sized> TranscriptLog for Arc<T> {
    fn append(&self, entry: TranscriptEntry) -> TribunalResult<()> {
        (**self).append(entry)
    }

    fn recent(&self, n: usize) -> Vec<TranscriptEntry> {
        (**self).recent(n)
    }

    fn entries(&self) -> Vec<TranscriptEntry> {
        (**self).entries()
    }

    fn seal(&self, trial_id: &TrialId) -> TribunalResult<()> {
        (**self).seal(trial_id)
    }
}

/// Decides which witnesses testify, after the prosecution has suggested some.
pub trait WitnessStrategy: Send + Sync {
    /// Return the witnesses to create, in the order they will be examined.
    fn select(&self, case: &AdmittedCase, suggestion: &str) -> Vec<WitnessSpec>;
}
