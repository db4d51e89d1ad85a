//! The trial orchestrator: a phase-sequenced state machine over one case.
//!
//! A trial runs four phases, strictly in order:
//!
//!   Opening → Witness Examination → Closing → Verdict → (Concluded)
//!
//! Every statement is one agent exchange: the orchestrator builds the prompt
//! from a template, the agent answers, and the answer is appended to the
//! transcript before the next prompt is built. Prompts that depend on an
//! earlier statement embed that statement's exact text. A phase cannot be
//! skipped, repeated, or resumed after it failed part-way.

use std::sync::Arc;

use tracing::{debug, info, warn};

use tribunal_contracts::{
    case::{AdmittedCase, Verdict},
    error::{TribunalError, TribunalResult},
    role::{CourtRole, SpeakerId},
    trial::{TranscriptEntry, TrialId, TrialPhase},
};

use crate::{
    prompts,
    registry::AgentRegistry,
    traits::{TranscriptLog, WitnessStrategy},
    witness::FixedWitnessPair,
};

const JUDGE: SpeakerId = SpeakerId::Party(CourtRole::Judge);
const PROSECUTION: SpeakerId = SpeakerId::Party(CourtRole::Prosecution);
const DEFENSE: SpeakerId = SpeakerId::Party(CourtRole::DefenseLawyer);

/// How much of the transcript later phases see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindow {
    /// Number of most recent entries included.
    pub entries: usize,
    /// Characters kept from each entry's content.
    pub truncate_chars: usize,
}

impl Default for SummaryWindow {
    fn default() -> Self {
        Self {
            entries: 10,
            truncate_chars: 100,
        }
    }
}

/// Render the lossy transcript summary embedded in closing and verdict prompts.
pub fn summarize(entries: &[TranscriptEntry], truncate_chars: usize) -> String {
    let mut summary = String::from("Trial Summary:\n");
    for entry in entries {
        summary.push_str(&entry.summary_line(truncate_chars));
        summary.push('\n');
    }
    summary
}

/// Drives one trial from opening statements to verdict.
///
/// Construct one orchestrator per case; it is discarded once the verdict
/// has been read.
pub struct TrialOrchestrator {
    trial_id: TrialId,
    case: AdmittedCase,
    registry: AgentRegistry,
    transcript: Box<dyn TranscriptLog>,
    witness_strategy: Arc<dyn WitnessStrategy>,
    summary_window: SummaryWindow,
    phase: TrialPhase,
    /// Set while a phase is running; left set if the phase fails.
    in_progress: Option<TrialPhase>,
    verdict: Option<Verdict>,
}

impl TrialOrchestrator {
    /// Create an orchestrator with the fixed witness pair and default summary window.
    pub fn new(
        trial_id: TrialId,
        case: AdmittedCase,
        registry: AgentRegistry,
        transcript: Box<dyn TranscriptLog>,
    ) -> Self {
        Self {
            trial_id,
            case,
            registry,
            transcript,
            witness_strategy: Arc::new(FixedWitnessPair),
            summary_window: SummaryWindow::default(),
            phase: TrialPhase::Opening,
            in_progress: None,
            verdict: None,
        }
    }

    pub fn with_witness_strategy(mut self, strategy: Arc<dyn WitnessStrategy>) -> Self {
        self.witness_strategy = strategy;
        self
    }

    pub fn with_summary_window(mut self, window: SummaryWindow) -> Self {
        self.summary_window = window;
        self
    }

    pub fn trial_id(&self) -> TrialId {
        self.trial_id
    }

    pub fn case(&self) -> &AdmittedCase {
        &self.case
    }

    /// The next phase to run, or `Concluded`.
    pub fn phase(&self) -> TrialPhase {
        self.phase
    }

    /// The verdict, once the verdict phase has completed.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.entries()
    }

    /// Run all four phases and return the verdict.
    pub async fn run_full_trial(&mut self) -> TribunalResult<Verdict> {
        info!(
            trial_id = %self.trial_id,
            case_id = %self.case.case_id,
            description = %self.case.description,
            "beginning trial"
        );

        self.run_opening_statements().await?;
        self.run_witness_examination().await?;
        self.run_closing_statements().await?;
        let verdict = self.run_verdict().await?;

        info!(
            trial_id = %self.trial_id,
            case_id = %self.case.case_id,
            verdict = %verdict,
            "trial completed"
        );
        Ok(verdict)
    }

    /// Phase 1: the judge introduces the case, then prosecution and defense open.
    pub async fn run_opening_statements(&mut self) -> TribunalResult<()> {
        self.begin_phase(TrialPhase::Opening)?;

        let intro = prompts::judge_introduction(&self.case.description);
        self.exchange(JUDGE, intro).await?;

        let prompt = prompts::prosecution_opening(&self.case.description);
        let prosecution_opening = self.exchange(PROSECUTION, prompt).await?;

        // The defense answers the prosecution's exact opening.
        self.exchange(DEFENSE, prompts::defense_opening(&prosecution_opening)).await?;

        self.complete_phase();
        Ok(())
    }

    /// Phase 2: witnesses are created and each goes through direct and cross
    /// examination.
    pub async fn run_witness_examination(&mut self) -> TribunalResult<()> {
        self.begin_phase(TrialPhase::WitnessExamination)?;

        self.exchange(JUDGE, prompts::JUDGE_INVITE_EVIDENCE.to_string()).await?;

        let suggestion_prompt = prompts::witness_suggestion(&self.case.description);
        let suggestion = self.exchange(PROSECUTION, suggestion_prompt).await?;

        // Witnesses are seated before anyone is examined.
        let specs = self.witness_strategy.select(&self.case, &suggestion);
        let seated: Vec<_> = specs
            .into_iter()
            .map(|spec| {
                let id = self.registry.create_witness(&spec.name, &spec.background);
                (id, spec)
            })
            .collect();

        for (id, spec) in seated {
            let witness = SpeakerId::Witness(id);
            let examiner = SpeakerId::Party(spec.called_by.role());
            let cross_examiner = SpeakerId::Party(spec.called_by.opponent().role());

            debug!(
                trial_id = %self.trial_id,
                witness_id = %id,
                witness = %spec.name,
                "examining witness"
            );

            let direct = prompts::direct_examination(
                &spec.name,
                &spec.examination_focus,
                &self.case.description,
            );
            let examination = self.exchange(examiner, direct).await?;

            let testimony = self
                .exchange(witness, prompts::answer_examination(&examination))
                .await?;

            let cross = self
                .exchange(cross_examiner, prompts::cross_examination(&spec.name, &testimony))
                .await?;

            self.exchange(witness, prompts::answer_cross_examination(&cross)).await?;
        }

        self.complete_phase();
        Ok(())
    }

    /// Phase 3: the judge invites closings; prosecution closes on a transcript
    /// summary, the defense closes on the prosecution's exact closing.
    pub async fn run_closing_statements(&mut self) -> TribunalResult<()> {
        self.begin_phase(TrialPhase::Closing)?;

        self.exchange(JUDGE, prompts::JUDGE_INVITE_CLOSINGS.to_string()).await?;

        let summary = self.summary();
        let prosecution_closing = self
            .exchange(PROSECUTION, prompts::prosecution_closing(&summary))
            .await?;

        self.exchange(DEFENSE, prompts::defense_closing(&prosecution_closing)).await?;

        self.complete_phase();
        Ok(())
    }

    /// Phase 4: the judge rules on a fresh summary and the verdict is extracted.
    ///
    /// The transcript is sealed afterwards. A ruling on record stands even
    /// if sealing fails; the failure is logged.
    pub async fn run_verdict(&mut self) -> TribunalResult<Verdict> {
        self.begin_phase(TrialPhase::Verdict)?;

        let summary = self.summary();
        let ruling = self.exchange(JUDGE, prompts::verdict_request(&summary)).await?;

        let verdict = Verdict::from_ruling(&ruling);
        self.verdict = Some(verdict);
        if let Err(e) = self.transcript.seal(&self.trial_id) {
            warn!(
                trial_id = %self.trial_id,
                case_id = %self.case.case_id,
                error = %e,
                "transcript not sealed"
            );
        }

        self.complete_phase();
        Ok(verdict)
    }

    /// One statement: prompt the speaker, record the answer, return it.
    async fn exchange(&mut self, speaker: SpeakerId, prompt: String) -> TribunalResult<String> {
        let agent = self.registry.get_mut(&speaker)?;
        let content = agent.respond(&prompt).await?;
        let entry = TranscriptEntry::new(speaker, agent.name(), content.clone());
        self.transcript.append(entry)?;
        Ok(content)
    }

    fn summary(&self) -> String {
        let recent = self.transcript.recent(self.summary_window.entries);
        summarize(&recent, self.summary_window.truncate_chars)
    }

    fn begin_phase(&mut self, expected: TrialPhase) -> TribunalResult<()> {
        if let Some(failed) = self.in_progress {
            return Err(TribunalError::StateMachine {
                reason: format!("phase '{}' did not complete; the trial must be discarded", failed),
            });
        }
        if self.phase != expected {
            return Err(TribunalError::StateMachine {
                reason: format!("cannot run '{}' while the trial is at '{}'", expected, self.phase),
            });
        }

        info!(
            trial_id = %self.trial_id,
            case_id = %self.case.case_id,
            phase = %expected,
            "phase started"
        );
        self.in_progress = Some(expected);
        Ok(())
    }

    fn complete_phase(&mut self) {
        self.in_progress = None;
        if let Some(next) = self.phase.next() {
            self.phase = next;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
