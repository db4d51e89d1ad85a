//! # tribunal-contracts
//!
//! Shared types and error contracts for the tribunal trial engine.
//!
//! All crates in the workspace import from here. No orchestration lives in
//! this crate, only data definitions, their small pure helpers, and errors.

pub mod case;
pub mod conversation;
pub mod error;
pub mod role;
pub mod trial;

#[cfg(test)]
mod tests {
    use super::*;
    use case::{CaseOutcome, CaseRecord, Verdict, MIN_DESCRIPTION_CHARS};
    use conversation::{CompletionRequest, ConversationEntry, MessageRole};
    use error::{CompletionError, TribunalError};
    use role::{Counsel, CourtRole, RoleTag, SpeakerId, WitnessId};
    use trial::{TranscriptEntry, TrialId, TrialPhase};

    // ── Verdict extraction ───────────────────────────────────────────────────

    #[test]
    fn ruling_with_granted_is_granted() {
        let v = Verdict::from_ruling("Having weighed the evidence, the motion is GRANTED.");
        assert_eq!(v, Verdict::Granted);
        assert_eq!(v.as_int(), 1);
    }

    #[test]
    fn ruling_with_denied_is_denied() {
        let v = Verdict::from_ruling("For these reasons the motion is hereby DENIED.");
        assert_eq!(v, Verdict::Denied);
        assert_eq!(v.as_int(), 0);
    }

    #[test]
    fn ruling_without_either_token_defaults_to_denied() {
        assert_eq!(Verdict::from_ruling("The court will take this under advis"), Verdict::Denied);
        assert_eq!(Verdict::from_ruling(""), Verdict::Denied);
    }

    #[test]
    fn ruling_match_is_case_insensitive() {
        assert_eq!(Verdict::from_ruling("the motion is granted"), Verdict::Granted);
    }

    #[test]
    fn ruling_with_both_tokens_favors_granted() {
        let v = Verdict::from_ruling("The standard is GRANTED or DENIED; here it is DENIED.");
        assert_eq!(v, Verdict::Granted);
    }

    // ── Case admission ───────────────────────────────────────────────────────

    #[test]
    fn admission_accepts_long_enough_description() {
        let case = CaseRecord::new("c-1", "0123456789");
        let admitted = case.admit(MIN_DESCRIPTION_CHARS).unwrap();
        assert_eq!(admitted.case_id, "c-1");
        assert_eq!(admitted.description, "0123456789");
    }

    #[test]
    fn admission_rejects_short_description() {
        let case = CaseRecord::new("c-2", "too short");
        match case.admit(MIN_DESCRIPTION_CHARS) {
            Err(TribunalError::MalformedInput { case_id, reason }) => {
                assert_eq!(case_id, "c-2");
                assert!(reason.contains("9 characters"), "reason was: {reason}");
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn admission_rejects_missing_description() {
        let case = CaseRecord::without_description("c-3");
        assert!(matches!(
            case.admit(MIN_DESCRIPTION_CHARS),
            Err(TribunalError::MalformedInput { .. })
        ));
    }

    #[test]
    fn admission_counts_characters_not_bytes() {
        // Nine characters, but well over ten bytes.
        let case = CaseRecord::new("c-4", "éééééééééé".chars().take(9).collect::<String>());
        assert!(case.admit(MIN_DESCRIPTION_CHARS).is_err());
    }

    #[test]
    fn outcome_verdict_defaults_to_denied() {
        let granted = CaseOutcome::Decided {
            verdict: Verdict::Granted,
        };
        let rejected = CaseOutcome::Rejected {
            reason: "short".to_string(),
        };
        let failed = CaseOutcome::Failed {
            reason: "timeout".to_string(),
        };
        assert_eq!(granted.verdict(), Verdict::Granted);
        assert_eq!(rejected.verdict(), Verdict::Denied);
        assert_eq!(failed.verdict(), Verdict::Denied);
    }

    // ── Speaker identity ─────────────────────────────────────────────────────

    #[test]
    fn speaker_ids_render_as_role_keys() {
        assert_eq!(SpeakerId::Party(CourtRole::DefenseLawyer).to_string(), "defense_lawyer");
        assert_eq!(SpeakerId::Witness(WitnessId(2)).to_string(), "witness_2");
    }

    #[test]
    fn speaker_ids_parse_back() {
        for role in CourtRole::ALL {
            let parsed: SpeakerId = role.as_str().parse().unwrap();
            assert_eq!(parsed, SpeakerId::Party(role));
        }
        assert_eq!("witness_7".parse::<SpeakerId>().unwrap(), SpeakerId::Witness(WitnessId(7)));
        assert!("witness_0".parse::<SpeakerId>().is_err());
        assert!("bailiff".parse::<SpeakerId>().is_err());
    }

    #[test]
    fn speaker_id_serializes_as_string() {
        let entry = TranscriptEntry::new(WitnessId(1), "Sam Morgan", "I saw it.");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["speaker_role"], "witness_1");

        let decoded: TranscriptEntry = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, entry);
    }

    #[test]
    fn witnesses_share_one_role_tag() {
        assert_eq!(SpeakerId::Witness(WitnessId(1)).role_tag(), RoleTag::Witness);
        assert_eq!(SpeakerId::Witness(WitnessId(9)).role_tag(), RoleTag::Witness);
        assert_eq!(SpeakerId::Party(CourtRole::Judge).role_tag(), RoleTag::Judge);
    }

    #[test]
    fn counsel_opponents_are_symmetric() {
        assert_eq!(Counsel::Prosecution.opponent(), Counsel::Defense);
        assert_eq!(Counsel::Defense.opponent().role(), CourtRole::Prosecution);
    }

    // ── Conversation ─────────────────────────────────────────────────────────

    #[test]
    fn request_messages_put_persona_first_and_input_last() {
        let request = CompletionRequest {
            speaker: "Judge Morgan".to_string(),
            persona: "You are a judge.".to_string(),
            history: vec![
                ConversationEntry::user("first"),
                ConversationEntry::assistant("reply"),
            ],
            input: "second".to_string(),
        };

        let messages = request.messages();
        let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::System, MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(messages[0].content, "You are a judge.");
        assert_eq!(messages[3].content, "second");
    }

    // ── Phases and summaries ─────────────────────────────────────────────────

    #[test]
    fn phases_advance_in_fixed_order() {
        let mut phase = TrialPhase::Opening;
        let mut seen = vec![phase];
        while let Some(next) = phase.next() {
            seen.push(next);
            phase = next;
        }
        assert_eq!(
            seen,
            vec![
                TrialPhase::Opening,
                TrialPhase::WitnessExamination,
                TrialPhase::Closing,
                TrialPhase::Verdict,
                TrialPhase::Concluded,
            ]
        );
    }

    #[test]
    fn summary_line_truncates_to_char_limit_and_appends_ellipsis() {
        let long = "x".repeat(250);
        let entry = TranscriptEntry::new(CourtRole::Prosecution, "Jordan Blake", long);
        let line = entry.summary_line(100);
        assert_eq!(line, format!("- Jordan Blake (prosecution): {}...", "x".repeat(100)));

        let short = TranscriptEntry::new(CourtRole::Judge, "Judge Morgan", "Order.");
        assert_eq!(short.summary_line(100), "- Judge Morgan (judge): Order....");
    }

    #[test]
    fn trial_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| TrialId::new().to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── Error display ────────────────────────────────────────────────────────

    #[test]
    fn error_agent_completion_display() {
        let err = TribunalError::AgentCompletion {
            agent: "Alex Carter".to_string(),
            reason: "connection reset".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Alex Carter"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn error_state_machine_display() {
        let err = TribunalError::StateMachine {
            reason: "closing before opening".to_string(),
        };
        assert!(err.to_string().contains("state machine error"));
    }

    #[test]
    fn completion_error_transience() {
        let transient = [
            CompletionError::Timeout { after_ms: 1000 },
            CompletionError::RateLimited {
                provider: "groq".to_string(),
                retry_after_ms: 200,
            },
            CompletionError::RequestFailed {
                provider: "groq".to_string(),
                status: 503,
                message: "unavailable".to_string(),
            },
            CompletionError::RequestFailed {
                provider: "groq".to_string(),
                status: 0,
                message: "connection refused".to_string(),
            },
        ];
        for err in transient {
            assert!(err.is_transient(), "{err} should be transient");
        }

        let permanent = [
            CompletionError::RequestFailed {
                provider: "groq".to_string(),
                status: 401,
                message: "bad key".to_string(),
            },
            CompletionError::InvalidResponse {
                provider: "groq".to_string(),
                reason: "no choices".to_string(),
            },
        ];
        for err in permanent {
            assert!(!err.is_transient(), "{err} should not be transient");
        }
    }
}
