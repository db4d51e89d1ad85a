//! The batch runner.
//!
//! Each admitted case becomes an independent trial with its own agents and
//! transcript. Trials run as separate tasks, at most `concurrency` at a time,
//! and share nothing but the completion provider. A failing trial yields a
//! `Failed` result for its case and nothing else.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{info, warn};

use tribunal_config::TribunalConfig;
use tribunal_contracts::{
    case::{CaseOutcome, CaseRecord},
    trial::TrialId,
};
use tribunal_core::{
    traits::{CompletionProvider, WitnessStrategy},
    AgentRegistry, CallPolicy, FixedWitnessPair, SummaryWindow, TrialOrchestrator,
};
use tribunal_transcript::InMemoryTranscript;

use crate::result::{CaseResult, Tally};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSettings {
    /// Trials in flight at once; values below 1 are treated as 1.
    pub concurrency: usize,
    pub min_description_chars: usize,
    pub call_policy: CallPolicy,
    pub summary_window: SummaryWindow,
    /// Attach each trial's transcript to its result.
    pub keep_transcripts: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self::from_config(&TribunalConfig::default())
    }
}

impl BatchSettings {
    pub fn from_config(config: &TribunalConfig) -> Self {
        Self {
            concurrency: config.runtime.concurrency,
            min_description_chars: config.runtime.min_description_chars,
            call_policy: config.call_policy(),
            summary_window: config.summary_window(),
            keep_transcripts: false,
        }
    }
}

/// Runs cases through full trials and collects one result per case.
#[derive(Clone)]
pub struct BatchRunner {
    provider: Arc<dyn CompletionProvider>,
    witness_strategy: Arc<dyn WitnessStrategy>,
    settings: BatchSettings,
}

impl BatchRunner {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: BatchSettings) -> Self {
        Self {
            provider,
            witness_strategy: Arc::new(FixedWitnessPair),
            settings,
        }
    }

    pub fn with_witness_strategy(mut self, strategy: Arc<dyn WitnessStrategy>) -> Self {
        self.witness_strategy = strategy;
        self
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Run every case and return their results in input order.
    ///
    /// Never fails as a whole: every input record produces exactly one result.
    pub async fn run_batch(&self, cases: Vec<CaseRecord>) -> Vec<CaseResult> {
        let concurrency = self.settings.concurrency.max(1);
        info!(
            cases = cases.len(),
            concurrency,
            provider = self.provider.provider_name(),
            "batch started"
        );

        let limiter = Arc::new(Semaphore::new(concurrency));
        let handles: Vec<_> = cases
            .into_iter()
            .map(|case| {
                let case_id = case.case_id.clone();
                let runner = self.clone();
                let limiter = Arc::clone(&limiter);
                let handle = tokio::spawn(async move {
                    let _permit = match limiter.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            let reason = format!("worker pool closed: {}", e);
                            return CaseResult::failed(case.case_id, reason);
                        }
                    };
                    runner.run_case(case).await
                });
                (case_id, handle)
            })
            .collect();

        let (case_ids, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let results: Vec<CaseResult> = join_all(handles)
            .await
            .into_iter()
            .zip(case_ids)
            .map(|(joined, case_id)| match joined {
                Ok(result) => result,
                Err(e) => {
                    warn!(case_id = %case_id, error = %e, "trial task aborted");
                    CaseResult::failed(case_id, format!("trial task aborted: {}", e))
                }
            })
            .collect();

        let tally = Tally::of(&results);
        info!(
            total = tally.total(),
            granted = tally.granted,
            denied = tally.denied,
            rejected = tally.rejected,
            failed = tally.failed,
            "batch finished"
        );
        results
    }

    /// Admit and try one case. Errors are converted into the result.
    pub async fn run_case(&self, case: CaseRecord) -> CaseResult {
        let admitted = match case.admit(self.settings.min_description_chars) {
            Ok(admitted) => admitted,
            Err(e) => {
                warn!(case_id = %case.case_id, error = %e, "case rejected without trial");
                return CaseResult::rejected(case.case_id, e.to_string());
            }
        };

        let trial_id = TrialId::new();
        let case_id = admitted.case_id.clone();
        let transcript = InMemoryTranscript::new(trial_id, case_id.clone());
        let registry = AgentRegistry::with_standing_parties(
            Arc::clone(&self.provider),
            self.settings.call_policy.clone(),
        );
        let mut trial =
            TrialOrchestrator::new(trial_id, admitted, registry, Box::new(transcript.clone()))
                .with_witness_strategy(Arc::clone(&self.witness_strategy))
                .with_summary_window(self.settings.summary_window);

        let outcome = match trial.run_full_trial().await {
            Ok(verdict) => CaseOutcome::Decided { verdict },
            Err(e) => {
                warn!(
                    case_id = %case_id,
                    trial_id = %trial_id,
                    phase = %trial.phase(),
                    error = %e,
                    "trial failed"
                );
                CaseOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        CaseResult {
            case_id,
            outcome,
            transcript: self.settings.keep_transcripts.then(|| transcript.export()),
        }
    }
}

impl std::fmt::Debug for BatchRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRunner")
            .field("provider", &self.provider.provider_name())
            .field("settings", &self.settings)
            .finish()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
