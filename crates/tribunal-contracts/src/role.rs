//! Courtroom roles and speaker identity.
//!
//! The five standing roles of a trial are a closed enum so the orchestrator
//! can address them without string keys. Witnesses are created mid-trial and
//! live in an open id space (`witness_1`, `witness_2`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five parties seated before any testimony begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtRole {
    Judge,
    Prosecution,
    DefenseLawyer,
    Defendant,
    Plaintiff,
}

impl CourtRole {
    /// Every standing role, in seating order.
    pub const ALL: [CourtRole; 5] = [
        CourtRole::Judge,
        CourtRole::DefenseLawyer,
        CourtRole::Prosecution,
        CourtRole::Defendant,
        CourtRole::Plaintiff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourtRole::Judge => "judge",
            CourtRole::Prosecution => "prosecution",
            CourtRole::DefenseLawyer => "defense_lawyer",
            CourtRole::Defendant => "defendant",
            CourtRole::Plaintiff => "plaintiff",
        }
    }
}

impl fmt::Display for CourtRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The role tag carried by every conversational agent.
///
/// Witnesses all share `RoleTag::Witness`; they are told apart by their
/// `WitnessId`, never by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleTag {
    Judge,
    Prosecution,
    DefenseLawyer,
    Defendant,
    Plaintiff,
    Witness,
}

impl From<CourtRole> for RoleTag {
    fn from(role: CourtRole) -> Self {
        match role {
            CourtRole::Judge => RoleTag::Judge,
            CourtRole::Prosecution => RoleTag::Prosecution,
            CourtRole::DefenseLawyer => RoleTag::DefenseLawyer,
            CourtRole::Defendant => RoleTag::Defendant,
            CourtRole::Plaintiff => RoleTag::Plaintiff,
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleTag::Witness => f.write_str("witness"),
            RoleTag::Judge => CourtRole::Judge.fmt(f),
            RoleTag::Prosecution => CourtRole::Prosecution.fmt(f),
            RoleTag::DefenseLawyer => CourtRole::DefenseLawyer.fmt(f),
            RoleTag::Defendant => CourtRole::Defendant.fmt(f),
            RoleTag::Plaintiff => CourtRole::Plaintiff.fmt(f),
        }
    }
}

/// Sequential witness identifier, 1-based, never reused within a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WitnessId(pub u32);

impl fmt::Display for WitnessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "witness_{}", self.0)
    }
}

/// Who spoke: a standing party or a specific witness.
///
/// Serialized as its string form (`"judge"`, `"witness_2"`) so transcripts
/// read the same on disk as they do in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SpeakerId {
    Party(CourtRole),
    Witness(WitnessId),
}

impl SpeakerId {
    pub fn role_tag(&self) -> RoleTag {
        match self {
            SpeakerId::Party(role) => RoleTag::from(*role),
            SpeakerId::Witness(_) => RoleTag::Witness,
        }
    }
}

impl From<CourtRole> for SpeakerId {
    fn from(role: CourtRole) -> Self {
        SpeakerId::Party(role)
    }
}

impl From<WitnessId> for SpeakerId {
    fn from(id: WitnessId) -> Self {
        SpeakerId::Witness(id)
    }
}

impl fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakerId::Party(role) => role.fmt(f),
            SpeakerId::Witness(id) => id.fmt(f),
        }
    }
}

impl FromStr for SpeakerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(n) = s.strip_prefix("witness_") {
            return match n.parse::<u32>() {
                Ok(n) if n > 0 => Ok(SpeakerId::Witness(WitnessId(n))),
                _ => Err(format!("invalid witness id '{}'", s)),
            };
        }
        CourtRole::ALL
            .iter()
            .find(|role| role.as_str() == s)
            .map(|role| SpeakerId::Party(*role))
            .ok_or_else(|| format!("unknown speaker '{}'", s))
    }
}

impl From<SpeakerId> for String {
    fn from(speaker: SpeakerId) -> Self {
        speaker.to_string()
    }
}

impl TryFrom<String> for SpeakerId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Which side of the aisle calls or cross-examines a witness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counsel {
    Prosecution,
    Defense,
}

impl Counsel {
    pub fn opponent(&self) -> Counsel {
        match self {
            Counsel::Prosecution => Counsel::Defense,
            Counsel::Defense => Counsel::Prosecution,
        }
    }

    pub fn role(&self) -> CourtRole {
        match self {
            Counsel::Prosecution => CourtRole::Prosecution,
            Counsel::Defense => CourtRole::DefenseLawyer,
        }
    }
}
