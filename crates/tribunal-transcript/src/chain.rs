//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. trial id as its hyphenated UUID string
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the transcript entry

use sha2::{Digest, Sha256};

use tribunal_contracts::{
    error::{TribunalError, TribunalResult},
    trial::{TranscriptEntry, TrialId},
};

use crate::event::{TranscriptEvent, GENESIS_HASH};

/// Compute the SHA-256 hash for one transcript event.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_event(
    trial_id: &TrialId,
    sequence: u64,
    entry: &TranscriptEntry,
    prev_hash: &str,
) -> TribunalResult<String> {
    let entry_json = serde_json::to_vec(entry).map_err(|e| TribunalError::TranscriptWriteFailed {
        reason: format!("cannot encode transcript entry: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(trial_id.to_string().as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&entry_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a hash chain.
///
/// Valid when every event links to its predecessor (or `GENESIS_HASH`),
/// carries the expected sequence number, and its `this_hash` matches the
/// value recomputed from its own fields. An empty chain is valid.
pub fn verify_chain(events: &[TranscriptEvent]) -> bool {
    let mut expected_prev = GENESIS_HASH.to_string();

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_event(&event.trial_id, event.sequence, &event.entry, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.clone();
    }

    true
}
