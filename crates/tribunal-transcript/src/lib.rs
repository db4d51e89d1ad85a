//! # tribunal-transcript
//!
//! The authoritative record of a trial: an append-only, SHA-256 hash-chained
//! list of statements.
//!
//! Every appended statement is wrapped in a `TranscriptEvent` that links to
//! the previous event by hash. Editing any recorded statement breaks the
//! chain, which `verify_chain` detects.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tribunal_transcript::InMemoryTranscript;
//! use tribunal_core::traits::TranscriptLog;
//!
//! let transcript = InMemoryTranscript::new(trial_id, "case-17");
//! transcript.append(entry)?;
//! transcript.seal(&trial_id)?;
//!
//! assert!(transcript.verify_integrity());
//! let record = transcript.export();
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{SealedTranscript, TranscriptEvent, GENESIS_HASH};
pub use memory::InMemoryTranscript;

// ── Tests ────────────────────────────────────────────────────────────────────
