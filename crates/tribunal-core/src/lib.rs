//! # tribunal-core
//!
//! The trial runtime: conversational agents, the per-trial agent registry,
//! and the orchestrator that drives a case through its four phases.
//!
//! This crate provides:
//! - The trait seams (`CompletionProvider`, `TranscriptLog`, `WitnessStrategy`)
//! - `ConversationalAgent` and its `CallPolicy`
//! - `TrialOrchestrator`, which wires them together in phase order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tribunal_core::{AgentRegistry, CallPolicy, TrialOrchestrator};
//!
//! let registry = AgentRegistry::with_standing_parties(provider, CallPolicy::default());
//! let mut trial = TrialOrchestrator::new(TrialId::new(), case, registry, Box::new(transcript));
//! let verdict = trial.run_full_trial().await?;
//! ```

pub mod agent;
pub mod orchestrator;
pub mod prompts;
pub mod registry;
pub mod traits;
pub mod witness;

pub use agent::{CallPolicy, ConversationalAgent};
pub use orchestrator::{summarize, SummaryWindow, TrialOrchestrator};
pub use registry::AgentRegistry;
pub use witness::{FixedWitnessPair, WitnessSpec};
