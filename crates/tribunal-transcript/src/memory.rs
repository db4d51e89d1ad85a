//! In-memory implementation of `TranscriptLog`.
//!
//! `InMemoryTranscript` keeps every event in a `Vec` behind a `Mutex`. It is
//! cheap to clone: clones share the same chain, so a caller can keep a handle
//! for `export()` after handing the transcript to an orchestrator.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::info;

use tribunal_contracts::{
    error::{TribunalError, TribunalResult},
    trial::{TranscriptEntry, TrialId},
};
use tribunal_core::traits::TranscriptLog;

use crate::{
    chain::{hash_event, verify_chain},
    event::{SealedTranscript, TranscriptEvent, GENESIS_HASH},
};

// ── Internal mutable state ───────────────────────────────────────────────────

pub(crate) struct TranscriptState {
    pub(crate) events: Vec<TranscriptEvent>,
    /// The `this_hash` of the last event, or `GENESIS_HASH`.
    pub(crate) last_hash: String,
    pub(crate) sealed_at: Option<DateTime<Utc>>,
}

// ── Public transcript ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct InMemoryTranscript {
    trial_id: TrialId,
    case_id: String,
    pub(crate) state: Arc<Mutex<TranscriptState>>,
}

impl InMemoryTranscript {
    pub fn new(trial_id: TrialId, case_id: impl Into<String>) -> Self {
        let state = TranscriptState {
            events: Vec::new(),
            last_hash: GENESIS_HASH.to_string(),
            sealed_at: None,
        };
        Self {
            trial_id,
            case_id: case_id.into(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn trial_id(&self) -> TrialId {
        self.trial_id
    }

    pub fn len(&self) -> usize {
        self.read().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_sealed(&self) -> bool {
        self.read().sealed_at.is_some()
    }

    /// Snapshot of the chain so far, sealed or not.
    pub fn export(&self) -> SealedTranscript {
        let state = self.read();
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        SealedTranscript {
            trial_id: self.trial_id,
            case_id: self.case_id.clone(),
            events: state.events.clone(),
            sealed_at: state.sealed_at,
            terminal_hash,
        }
    }

    /// Verify that the in-memory chain has not been tampered with.
    pub fn verify_integrity(&self) -> bool {
        verify_chain(&self.read().events)
    }

    /// Readers tolerate a poisoned lock: events are only ever pushed whole.
    fn read(&self) -> MutexGuard<'_, TranscriptState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> TribunalResult<MutexGuard<'_, TranscriptState>> {
        self.state.lock().map_err(|e| TribunalError::TranscriptWriteFailed {
            reason: format!("transcript state lock poisoned: {}", e),
        })
    }
}

// ── TranscriptLog impl ───────────────────────────────────────────────────────

impl TranscriptLog for InMemoryTranscript {
    /// Append one entry to the chain and echo it to the operator log.
    ///
    /// Fails once the transcript has been sealed.
    fn append(&self, entry: TranscriptEntry) -> TribunalResult<()> {
        let mut state = self.write()?;
        if state.sealed_at.is_some() {
            return Err(TribunalError::TranscriptWriteFailed {
                reason: format!("transcript for trial {} is sealed", self.trial_id),
            });
        }

        let sequence = state.events.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_event(&self.trial_id, sequence, &entry, &prev_hash)?;

        info!(
            trial_id = %self.trial_id,
            sequence,
            role = %entry.speaker_role,
            "{}: {}",
            entry.speaker_name,
            entry.content
        );

        state.events.push(TranscriptEvent {
            sequence,
            trial_id: self.trial_id,
            entry,
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;
        Ok(())
    }

    fn recent(&self, n: usize) -> Vec<TranscriptEntry> {
        let state = self.read();
        let start = state.events.len().saturating_sub(n);
        state.events[start..].iter().map(|e| e.entry.clone()).collect()
    }

    fn entries(&self) -> Vec<TranscriptEntry> {
        self.read().events.iter().map(|e| e.entry.clone()).collect()
    }

    fn seal(&self, trial_id: &TrialId) -> TribunalResult<()> {
        let mut state = self.write()?;
        if *trial_id != self.trial_id {
            return Err(TribunalError::TranscriptWriteFailed {
                reason: format!(
                    "cannot seal transcript of trial {} as trial {}",
                    self.trial_id, trial_id
                ),
            });
        }
        if state.sealed_at.is_none() {
            state.sealed_at = Some(Utc::now());
        }

        info!(
            trial_id = %trial_id,
            case_id = %self.case_id,
            event_count = state.events.len(),
            terminal_hash = %state.last_hash,
            "transcript sealed"
        );
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryTranscript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTranscript")
            .field("trial_id", &self.trial_id)
            .field("case_id", &self.case_id)
            .field("events", &self.len())
            .finish()
    }
}
