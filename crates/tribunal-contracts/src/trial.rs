//! Trial identity, phases, and transcript entries.

use serde::{Deserialize, Serialize};

use crate::role::SpeakerId;

/// Unique identifier for one trial run.
///
/// Appears in every transcript event and log line produced for that trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrialId(pub uuid::Uuid);

impl TrialId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for TrialId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TrialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The stages of a trial, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPhase {
    Opening,
    WitnessExamination,
    Closing,
    Verdict,
    /// Terminal: the verdict has been extracted.
    Concluded,
}

impl TrialPhase {
    /// The phase that follows this one. `Concluded` has no successor.
    pub fn next(&self) -> Option<TrialPhase> {
        match self {
            TrialPhase::Opening => Some(TrialPhase::WitnessExamination),
            TrialPhase::WitnessExamination => Some(TrialPhase::Closing),
            TrialPhase::Closing => Some(TrialPhase::Verdict),
            TrialPhase::Verdict => Some(TrialPhase::Concluded),
            TrialPhase::Concluded => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TrialPhase::Opening => "OPENING STATEMENTS",
            TrialPhase::WitnessExamination => "WITNESS EXAMINATION & ARGUMENTS",
            TrialPhase::Closing => "CLOSING STATEMENTS",
            TrialPhase::Verdict => "JUDGE'S RULING",
            TrialPhase::Concluded => "CONCLUDED",
        }
    }
}

impl std::fmt::Display for TrialPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// One line of the authoritative trial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker_role: SpeakerId,
    pub speaker_name: String,
    pub content: String,
}

impl TranscriptEntry {
    pub fn new(
        speaker_role: impl Into<SpeakerId>,
        speaker_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            speaker_role: speaker_role.into(),
            speaker_name: speaker_name.into(),
            content: content.into(),
        }
    }

    /// One summary line: content cut to `max_chars` characters plus `...`.
    ///
    /// The ellipsis is always appended, even when nothing was cut.
    pub fn summary_line(&self, max_chars: usize) -> String {
        let truncated: String = self.content.chars().take(max_chars).collect();
        format!("- {} ({}): {}...", self.speaker_name, self.speaker_role, truncated)
    }
}
