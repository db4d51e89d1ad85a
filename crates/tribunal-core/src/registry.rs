//! The agent registry of one trial.
//!
//! Standing parties are keyed by the closed `CourtRole` enum; witnesses live
//! in a separate map keyed by sequential `WitnessId`s. Agents are owned here
//! exclusively and never shared between trials.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use tribunal_contracts::{
    error::{TribunalError, TribunalResult},
    role::{CourtRole, RoleTag, SpeakerId, WitnessId},
};

use crate::{
    agent::{CallPolicy, ConversationalAgent},
    prompts,
    traits::CompletionProvider,
};

pub struct AgentRegistry {
    parties: BTreeMap<CourtRole, ConversationalAgent>,
    witnesses: BTreeMap<WitnessId, ConversationalAgent>,
    /// Highest witness number handed out so far.
    witness_count: u32,
    provider: Arc<dyn CompletionProvider>,
    policy: CallPolicy,
}

impl AgentRegistry {
    /// An empty registry. Witnesses created later share `provider` and `policy`.
    pub fn new(provider: Arc<dyn CompletionProvider>, policy: CallPolicy) -> Self {
        Self {
            parties: BTreeMap::new(),
            witnesses: BTreeMap::new(),
            witness_count: 0,
            provider,
            policy,
        }
    }

    /// A registry with the five standing parties already seated.
    pub fn with_standing_parties(
        provider: Arc<dyn CompletionProvider>,
        policy: CallPolicy,
    ) -> Self {
        let mut registry = Self::new(provider, policy);
        for role in CourtRole::ALL {
            let (name, persona) = prompts::standing_party(role);
            let agent = registry.build_agent(name, RoleTag::from(role), persona.to_string());
            registry.register(SpeakerId::Party(role), agent);
        }
        registry
    }

    /// Register `agent` under `speaker`, replacing any existing agent.
    ///
    /// Registering an explicit witness id advances the witness counter past
    /// it, so `create_witness` never hands the same id out again.
    pub fn register(&mut self, speaker: SpeakerId, agent: ConversationalAgent) {
        match speaker {
            SpeakerId::Party(role) => {
                self.parties.insert(role, agent);
            }
            SpeakerId::Witness(id) => {
                self.witness_count = self.witness_count.max(id.0);
                self.witnesses.insert(id, agent);
            }
        }
    }

    pub fn get(&self, speaker: &SpeakerId) -> TribunalResult<&ConversationalAgent> {
        let agent = match speaker {
            SpeakerId::Party(role) => self.parties.get(role),
            SpeakerId::Witness(id) => self.witnesses.get(id),
        };
        agent.ok_or_else(|| TribunalError::AgentNotFound {
            speaker: speaker.to_string(),
        })
    }

    pub fn get_mut(&mut self, speaker: &SpeakerId) -> TribunalResult<&mut ConversationalAgent> {
        let agent = match speaker {
            SpeakerId::Party(role) => self.parties.get_mut(role),
            SpeakerId::Witness(id) => self.witnesses.get_mut(id),
        };
        agent.ok_or_else(|| TribunalError::AgentNotFound {
            speaker: speaker.to_string(),
        })
    }

    /// Create and register a witness, returning its freshly allocated id.
    ///
    /// Ids start at `witness_1` regardless of how many standing parties
    /// exist, and increase by one per call.
    pub fn create_witness(&mut self, name: &str, background: &str) -> WitnessId {
        self.witness_count += 1;
        let id = WitnessId(self.witness_count);
        let persona = prompts::witness_persona(name, background);
        let agent = self.build_agent(name, RoleTag::Witness, persona);
        self.witnesses.insert(id, agent);
        debug!(witness_id = %id, name, "witness created");
        id
    }

    pub fn witness_count(&self) -> u32 {
        self.witness_count
    }

    /// Registered witness ids, in creation order.
    pub fn witness_ids(&self) -> Vec<WitnessId> {
        self.witnesses.keys().copied().collect()
    }

    /// Total number of registered agents.
    pub fn len(&self) -> usize {
        self.parties.len() + self.witnesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn build_agent(&self, name: &str, role: RoleTag, persona: String) -> ConversationalAgent {
        ConversationalAgent::seated(name.to_string(), role, persona, Arc::clone(&self.provider))
            .with_call_policy(self.policy.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use tribunal_contracts::{
        conversation::CompletionRequest,
        error::{CompletionError, TribunalError},
        role::{CourtRole, RoleTag, SpeakerId, WitnessId},
    };

    use crate::agent::{CallPolicy, ConversationalAgent};
    use crate::traits::CompletionProvider;

    use super::AgentRegistry;

    struct SilentProvider;

    #[async_trait]
    impl CompletionProvider for SilentProvider {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            Ok("...".to_string())
        }

        fn provider_name(&self) -> &str {
            "silent"
        }
    }

    fn registry() -> AgentRegistry {
        AgentRegistry::with_standing_parties(Arc::new(SilentProvider), CallPolicy::default())
    }

    #[test]
    fn standing_parties_are_seated() {
        let registry = registry();
        assert_eq!(registry.len(), 5);
        let judge = registry.get(&SpeakerId::Party(CourtRole::Judge)).unwrap();
        assert_eq!(judge.name(), "Judge Morgan");
        assert_eq!(judge.role(), RoleTag::Judge);
        let defense = registry.get(&SpeakerId::Party(CourtRole::DefenseLawyer)).unwrap();
        assert_eq!(defense.name(), "Alex Carter");
    }

    #[test]
    fn witness_ids_start_at_one_and_increase() {
        let mut registry = registry();
        let first = registry.create_witness("Dr. Jamie Reynolds", "Expert");
        let second = registry.create_witness("Sam Morgan", "Character witness");

        assert_eq!(first, WitnessId(1));
        assert_eq!(second, WitnessId(2));
        assert_eq!(first.to_string(), "witness_1");
        assert_eq!(registry.witness_count(), 2);
        assert_eq!(registry.witness_ids(), vec![WitnessId(1), WitnessId(2)]);

        let witness = registry.get(&SpeakerId::Witness(second)).unwrap();
        assert_eq!(witness.name(), "Sam Morgan");
        assert_eq!(witness.role(), RoleTag::Witness);
        assert!(witness.persona().contains("Character witness"));
    }

    #[test]
    fn missing_speaker_is_not_found() {
        let registry = registry();
        match registry.get(&SpeakerId::Witness(WitnessId(1))) {
            Err(TribunalError::AgentNotFound { speaker }) => assert_eq!(speaker, "witness_1"),
            other => panic!("expected AgentNotFound, got {:?}", other),
        }
    }

    #[test]
    fn register_overwrites_existing_role() {
        let mut registry = registry();
        let substitute = ConversationalAgent::new(
            "Judge Okafor",
            RoleTag::Judge,
            "You are Judge Okafor.",
            Arc::new(SilentProvider),
        )
        .unwrap();
        registry.register(SpeakerId::Party(CourtRole::Judge), substitute);

        assert_eq!(registry.len(), 5);
        let judge = registry.get(&SpeakerId::Party(CourtRole::Judge)).unwrap();
        assert_eq!(judge.name(), "Judge Okafor");
    }

    #[test]
    fn explicit_witness_registration_is_never_reissued() {
        let mut registry = AgentRegistry::new(Arc::new(SilentProvider), CallPolicy::default());
        let witness = ConversationalAgent::new(
            "Pat Lee",
            RoleTag::Witness,
            "You are Pat Lee.",
            Arc::new(SilentProvider),
        )
        .unwrap();
        registry.register(SpeakerId::Witness(WitnessId(3)), witness);

        assert_eq!(registry.create_witness("Next", "Bystander"), WitnessId(4));
    }
}
