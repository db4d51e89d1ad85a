//! Per-case results and their tally.

use serde::{Deserialize, Serialize};

use tribunal_contracts::case::{CaseOutcome, Verdict};
use tribunal_transcript::SealedTranscript;

/// The outcome of one case, plus its transcript when one was kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub case_id: String,
    pub outcome: CaseOutcome,
    /// Present for cases that went to trial, if transcripts are kept.
    /// A failed trial keeps the statements made before the failure, unsealed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<SealedTranscript>,
}

impl CaseResult {
    pub fn rejected(case_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            outcome: CaseOutcome::Rejected {
                reason: reason.into(),
            },
            transcript: None,
        }
    }

    pub fn failed(case_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            outcome: CaseOutcome::Failed {
                reason: reason.into(),
            },
            transcript: None,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.outcome.verdict()
    }
}

/// Counts by outcome, for the end-of-batch log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub granted: usize,
    pub denied: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl Tally {
    pub fn of(results: &[CaseResult]) -> Self {
        results.iter().fold(Self::default(), |mut tally, result| {
            match &result.outcome {
                CaseOutcome::Decided {
                    verdict: Verdict::Granted,
                } => tally.granted += 1,
                CaseOutcome::Decided {
                    verdict: Verdict::Denied,
                } => tally.denied += 1,
                CaseOutcome::Rejected { .. } => tally.rejected += 1,
                CaseOutcome::Failed { .. } => tally.failed += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> usize {
        self.granted + self.denied + self.rejected + self.failed
    }
}

/// `(case_id, verdict)` pairs in result order.
pub fn verdicts(results: &[CaseResult]) -> Vec<(String, Verdict)> {
    results.iter().map(|r| (r.case_id.clone(), r.verdict())).collect()
}
