//! `CompletionProvider` over an OpenAI-compatible chat-completions API.

use async_trait::async_trait;
use tracing::debug;

use tribunal_config::ProviderSettings;
use tribunal_contracts::{conversation::CompletionRequest, error::CompletionError};
use tribunal_core::traits::CompletionProvider;

use crate::client::ChatClient;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

const CHAT_ENDPOINT: &str = "chat/completions";

/// Sends each agent turn as one chat-completions request.
///
/// The provider is stateless: the agent's persona and history arrive with
/// every request and nothing is kept between calls.
#[derive(Debug)]
pub struct ChatCompletionProvider {
    client: ChatClient,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatCompletionProvider {
    pub fn new(
        client: ChatClient,
        model: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
            max_tokens,
        }
    }

    /// Build a provider from configuration and an explicitly supplied key.
    pub fn from_settings(settings: &ProviderSettings, api_key: impl Into<String>) -> Self {
        let client = ChatClient::new(
            provider_label(&settings.base_url),
            settings.base_url.clone(),
            api_key,
            settings.requests_per_minute,
        );
        Self::new(client, settings.model.clone(), settings.temperature, settings.max_tokens)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn build_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: request
                .messages()
                .into_iter()
                .map(|entry| ChatMessage {
                    role: entry.role.as_str().to_string(),
                    content: entry.content,
                })
                .collect(),
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        }
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = self.build_request(request);
        debug!(
            provider = self.client.provider(),
            model = %self.model,
            speaker = %request.speaker,
            messages = body.messages.len(),
            "sending chat completion"
        );

        let response: ChatResponse = self.client.request(CHAT_ENDPOINT, &body).await?;
        first_choice_text(response, self.client.provider())
    }

    fn provider_name(&self) -> &str {
        self.client.provider()
    }
}

/// The content of the first choice; an empty choice list is an invalid response.
pub(crate) fn first_choice_text(
    response: ChatResponse,
    provider: &str,
) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::InvalidResponse {
            provider: provider.to_string(),
            reason: "response contained no choices".to_string(),
        })
}

/// "groq" for the default endpoint, otherwise the endpoint's host.
fn provider_label(base_url: &str) -> String {
    let host = base_url
        .split("://")
        .nth(1)
        .unwrap_or(base_url)
        .split('/')
        .next()
        .unwrap_or_default();
    if host.ends_with("groq.com") {
        "groq".to_string()
    } else if host.is_empty() {
        "chat".to_string()
    } else {
        host.to_string()
    }
}

#[cfg(test)]
mod tests {
    use tribunal_config::ProviderSettings;
    use tribunal_contracts::conversation::{CompletionRequest, ConversationEntry};
    use tribunal_contracts::error::CompletionError;

    use super::*;

    fn provider() -> ChatCompletionProvider {
        ChatCompletionProvider::from_settings(&ProviderSettings::default(), "test-key")
    }

    #[test]
    fn request_carries_persona_history_and_input_in_order() {
        let request = CompletionRequest {
            speaker: "Judge Morgan".to_string(),
            persona: "You are Judge Morgan.".to_string(),
            history: vec![
                ConversationEntry::user("Introduce the case."),
                ConversationEntry::assistant("Court is in session."),
            ],
            input: "Invite closings.".to_string(),
        };

        let body = provider().build_request(&request);
        let roles: Vec<&str> = body.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(body.messages[0].content, "You are Judge Morgan.");
        assert_eq!(body.messages[3].content, "Invite closings.");
        assert_eq!(body.model, "llama3-70b-8192");
        assert_eq!(body.max_tokens, Some(1024));
        assert_eq!(body.temperature, Some(0.7));
    }

    #[test]
    fn request_serializes_to_chat_completions_shape() {
        let request = CompletionRequest {
            speaker: "Plaintiff".to_string(),
            persona: "You are the plaintiff.".to_string(),
            history: vec![],
            input: "Speak.".to_string(),
        };
        let json = serde_json::to_value(provider().build_request(&request)).unwrap();
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 1024);
    }

    #[test]
    fn first_choice_is_returned() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"GRANTED."},"finish_reason":"stop"},
                           {"message":{"role":"assistant","content":"ignored"}}],
                "usage":{"prompt_tokens":10,"completion_tokens":2,"total_tokens":12}}"#,
        )
        .unwrap();
        assert_eq!(first_choice_text(response, "groq").unwrap(), "GRANTED.");
    }

    #[test]
    fn empty_choices_is_invalid_response() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        match first_choice_text(response, "groq") {
            Err(CompletionError::InvalidResponse { provider, reason }) => {
                assert_eq!(provider, "groq");
                assert!(reason.contains("no choices"));
            }
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn provider_label_names_the_endpoint() {
        assert_eq!(provider_label("https://api.groq.com/openai/v1"), "groq");
        assert_eq!(provider_label("http://localhost:8080/v1"), "localhost:8080");
        assert_eq!(provider().provider_name(), "groq");
    }
}
