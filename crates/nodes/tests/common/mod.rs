//! Fake model providers shared by the orchestration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use pipeline::{LlmError, LlmProvider};

/// Replies with a fixed script, one entry per call, then fails.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Transport("script exhausted".to_string())))
    }
}

/// Replies by inspecting the prompt, so each lead can get its own answer.
pub struct PromptProvider<F> {
    respond: F,
    calls: AtomicUsize,
}

impl<F> PromptProvider<F>
where
    F: Fn(&str) -> Result<String, LlmError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F> LlmProvider for PromptProvider<F>
where
    F: Fn(&str) -> Result<String, LlmError> + Send + Sync,
{
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(prompt)
    }
}

pub fn reply(persona: &str, urgency: &str, summary: &str) -> Result<String, LlmError> {
    Ok(format!(
        "```json\n{{\"persona_type\": \"{persona}\", \"urgency\": \"{urgency}\", \"summary\": \"{summary}\"}}\n```"
    ))
}
