//! Transcript event and sealed transcript types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tribunal_contracts::trial::{TranscriptEntry, TrialId};

/// The `prev_hash` of the first event in every chain: 64 hex zeros.
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// One statement in the hash chain of a trial.
///
/// Changing any field, including the wrapped entry, invalidates `this_hash`
/// and every later `prev_hash`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,
    pub trial_id: TrialId,
    pub entry: TranscriptEntry,
    /// Hash of the previous event, or `GENESIS_HASH`.
    pub prev_hash: String,
    pub this_hash: String,
}

/// An exported transcript for one trial.
///
/// `terminal_hash` is the `this_hash` of the last event and commits to the
/// whole record. It is empty when nothing was said.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealedTranscript {
    pub trial_id: TrialId,
    pub case_id: String,
    pub events: Vec<TranscriptEvent>,
    /// When the trial concluded; `None` if exported before the verdict.
    pub sealed_at: Option<DateTime<Utc>>,
    pub terminal_hash: String,
}

impl SealedTranscript {
    pub fn is_sealed(&self) -> bool {
        self.sealed_at.is_some()
    }

    /// The statements alone, in order.
    pub fn entries(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.events.iter().map(|e| &e.entry)
    }
}
