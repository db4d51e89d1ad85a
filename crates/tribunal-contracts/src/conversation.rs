//! Conversation history and completion request types.
//!
//! An agent's private history is a flat list of `ConversationEntry` values
//! that only ever grows by (user, assistant) pairs. The persona is not part
//! of the history; it is prepended as the system turn on every request.

use serde::{Deserialize, Serialize};

/// The author of one conversation turn, in chat-completion terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// One turn of an agent's conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub role: MessageRole,
    pub content: String,
}

impl ConversationEntry {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a completion provider needs to produce one agent reply.
///
/// Providers render this as `[system persona, ...history, user input]`
/// via [`CompletionRequest::messages`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Display name of the agent asking, for provider-side logging.
    pub speaker: String,
    /// The agent's fixed system instructions.
    pub persona: String,
    /// The agent's prior turns, oldest first.
    pub history: Vec<ConversationEntry>,
    /// The new user turn.
    pub input: String,
}

impl CompletionRequest {
    /// The full ordered message list sent to the model.
    pub fn messages(&self) -> Vec<ConversationEntry> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(ConversationEntry::system(self.persona.clone()));
        messages.extend(self.history.iter().cloned());
        messages.push(ConversationEntry::user(self.input.clone()));
        messages
    }
}
