//! Deterministic completion provider for tests and offline runs.
//!
//! `ScriptedProvider` answers from a closure instead of a network call.
//! `ScriptedProvider::offline` plays a full, canned courtroom exchange so a
//! trial can be demonstrated without an API key.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use tribunal_contracts::{case::Verdict, conversation::CompletionRequest, error::CompletionError};
use tribunal_core::traits::CompletionProvider;

/// The reply function: the request and its 1-based call number.
pub type Script =
    dyn Fn(&CompletionRequest, usize) -> Result<String, CompletionError> + Send + Sync;

pub struct ScriptedProvider {
    name: String,
    script: Box<Script>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&CompletionRequest, usize) -> Result<String, CompletionError> + Send + Sync + 'static,
    {
        Self {
            name: "scripted".to_string(),
            script: Box::new(script),
            calls: AtomicUsize::new(0),
        }
    }

    /// Canned courtroom dialogue; the judge always rules `ruling`.
    pub fn offline(ruling: Verdict) -> Self {
        Self::new(move |request, _| Ok(offline_reply(request, ruling))).named("offline")
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Completions requested so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        (self.script)(request, call)
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for ScriptedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedProvider")
            .field("name", &self.name)
            .field("calls", &self.calls())
            .finish()
    }
}

/// Pick a canned line from the shape of the prompt.
fn offline_reply(request: &CompletionRequest, ruling: Verdict) -> String {
    let input = request.input.as_str();
    let speaker = request.speaker.as_str();

    if input.starts_with("Deliberate on this case") {
        let finding = match ruling {
            Verdict::Granted => "the plaintiff has carried the burden of proof",
            Verdict::Denied => "the plaintiff has not carried the burden of proof",
        };
        return format!(
            "Having considered the testimony and the arguments of counsel, the court finds that \
             {finding}. The motion is {ruling}."
        );
    }

    let line = if input.starts_with("Introduce the case") {
        "Court is now in session. We are here to hear the matter before us. \
         Counsel for the prosecution, you may begin your opening statement."
    } else if input.starts_with("Present your opening statement about") {
        "Your Honor, the evidence will show that the defendant knowingly broke the agreement \
         at the heart of this dispute and caused real harm."
    } else if input.starts_with("Present your opening statement responding") {
        "Your Honor, the prosecution offers a story, not proof. The agreement was overbroad \
         and my client acted in good faith."
    } else if input.starts_with("Invite the parties to present witnesses") {
        "The court will now hear witnesses. Counsel, call your first witness."
    } else if input.starts_with("Based on the case") {
        "The State intends to call an expert familiar with the industry and a witness to the \
         defendant's conduct."
    } else if input.starts_with("Examine your witness") {
        "Please tell the court, in your own words, what you know about the events in question."
    } else if input.starts_with("Respond to this examination") {
        "I reviewed the relevant records myself, and they are consistent with what I observed."
    } else if input.starts_with("Cross-examine") {
        "Isn't it true that you never spoke with the defendant directly about these events?"
    } else if input.starts_with("Respond to this cross-examination") {
        "That is correct, but my testimony rests on the documents, not on conversation."
    } else if input.starts_with("Invite the parties to present their closing") {
        "The evidence is closed. Counsel may now present closing statements."
    } else if input.starts_with("Present your closing statement summarizing") {
        "The testimony was consistent and uncontradicted. We ask the court to grant the motion."
    } else if input.starts_with("Present your closing statement responding") {
        "The prosecution has shown inconvenience, not breach. We ask the court to deny the motion."
    } else {
        "I have nothing further at this time."
    };
    format!("{speaker}: {line}")
}
