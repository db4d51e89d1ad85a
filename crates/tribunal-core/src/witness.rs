//! Witness selection.
//!
//! The prosecution is asked to suggest witnesses, but its answer is not
//! parsed: `FixedWitnessPair` always seats the same two witnesses, one
//! called by each side. Other strategies can replace it through
//! [`WitnessStrategy`].

use tribunal_contracts::{case::AdmittedCase, role::Counsel};

use crate::traits::WitnessStrategy;

/// A witness to be created during examination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessSpec {
    pub name: String,
    pub background: String,
    /// The side that calls the witness and conducts direct examination.
    pub called_by: Counsel,
    /// Phrase placed between the witness name and the case text in the
    /// direct-examination prompt, e.g. "about this case".
    pub examination_focus: String,
}

impl WitnessSpec {
    pub fn new(
        name: impl Into<String>,
        background: impl Into<String>,
        called_by: Counsel,
        examination_focus: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            background: background.into(),
            called_by,
            examination_focus: examination_focus.into(),
        }
    }
}

/// The default strategy: an expert for the prosecution, a character
/// witness for the defense, regardless of what was suggested.
#[derive(Debug, Clone, Default)]
pub struct FixedWitnessPair;

impl WitnessStrategy for FixedWitnessPair {
    fn select(&self, _case: &AdmittedCase, _suggestion: &str) -> Vec<WitnessSpec> {
        vec![
            WitnessSpec::new(
                "Dr. Jamie Reynolds",
                "Expert in the relevant field with knowledge of the case facts",
                Counsel::Prosecution,
                "about key evidence in this case",
            ),
            WitnessSpec::new(
                "Sam Morgan",
                "Character witness who can speak to defendant's reputation and behavior",
                Counsel::Defense,
                "about this case",
            ),
        ]
    }
}
