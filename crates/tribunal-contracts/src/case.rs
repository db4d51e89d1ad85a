//! Case records, admission, and verdicts.

use serde::{Deserialize, Serialize};

use crate::error::{TribunalError, TribunalResult};

/// Minimum description length, in characters, for a case to go to trial.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// One input case as read from the caller. Immutable once read.
///
/// `case_description` is optional because upstream sources (CSV rows with an
/// empty cell) can omit it; such records are rejected at admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: String,
    pub case_description: Option<String>,
}

impl CaseRecord {
    pub fn new(case_id: impl Into<String>, case_description: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            case_description: Some(case_description.into()),
        }
    }

    /// A record with no description at all.
    pub fn without_description(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            case_description: None,
        }
    }

    /// Check the record is fit for trial.
    ///
    /// The description must be present and at least `min_chars` characters
    /// long. Length is counted in `char`s and the text is not trimmed.
    pub fn admit(&self, min_chars: usize) -> TribunalResult<AdmittedCase> {
        let description = self.case_description.as_deref().ok_or_else(|| {
            TribunalError::MalformedInput {
                case_id: self.case_id.clone(),
                reason: "case description is missing".to_string(),
            }
        })?;

        let len = description.chars().count();
        if len < min_chars {
            return Err(TribunalError::MalformedInput {
                case_id: self.case_id.clone(),
                reason: format!(
                    "case description has {} characters, at least {} required",
                    len, min_chars
                ),
            });
        }

        Ok(AdmittedCase {
            case_id: self.case_id.clone(),
            description: description.to_string(),
        })
    }
}

/// A case that passed admission. Only these reach the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmittedCase {
    pub case_id: String,
    pub description: String,
}

/// The binary ruling of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Denied,
    Granted,
}

impl Verdict {
    /// The token the judge is asked to conclude with.
    pub const GRANTED_TOKEN: &'static str = "GRANTED";

    /// Derive a verdict from the judge's closing statement.
    ///
    /// Case-insensitive substring match on "GRANTED". Anything else, including
    /// malformed or truncated text, is `Denied`. Text containing both
    /// "GRANTED" and "DENIED" yields `Granted`.
    pub fn from_ruling(statement: &str) -> Self {
        if statement.to_uppercase().contains(Self::GRANTED_TOKEN) {
            Verdict::Granted
        } else {
            Verdict::Denied
        }
    }

    /// Tabulated form: GRANTED = 1, DENIED = 0.
    pub fn as_int(&self) -> u8 {
        match self {
            Verdict::Denied => 0,
            Verdict::Granted => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Denied => "DENIED",
            Verdict::Granted => "GRANTED",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one case ended at the batch boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// The trial ran to completion.
    Decided { verdict: Verdict },
    /// The case never went to trial (missing or short description).
    Rejected { reason: String },
    /// The trial started but failed part-way.
    Failed { reason: String },
}

impl CaseOutcome {
    /// The tabulated verdict. Rejected and failed cases are `Denied`.
    pub fn verdict(&self) -> Verdict {
        match self {
            CaseOutcome::Decided { verdict } => *verdict,
            CaseOutcome::Rejected { .. } | CaseOutcome::Failed { .. } => Verdict::Denied,
        }
    }
}
