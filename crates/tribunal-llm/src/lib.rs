//! # tribunal-llm
//!
//! Completion providers for the trial engine.
//!
//! - `ChatCompletionProvider` talks to any OpenAI-compatible chat API
//!   (Groq by default) through a rate-limited `ChatClient`
//! - `ScriptedProvider` answers from a closure, for tests and offline runs

pub mod chat;
pub mod client;
pub mod scripted;
pub mod types;

pub use chat::ChatCompletionProvider;
pub use client::ChatClient;
pub use scripted::ScriptedProvider;
