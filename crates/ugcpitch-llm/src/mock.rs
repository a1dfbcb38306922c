//! Queue-backed [`TextGenerator`] for tests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::generator::TextGenerator;

/// One call seen by a [`ScriptedGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub web_search: bool,
}

/// Replays queued replies in order and records every call it receives.
///
/// Calling it after the queue is empty yields [`LlmError::ScriptExhausted`].
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    delay: Option<Duration>,
}

impl ScriptedGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the given text replies.
    #[must_use]
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let generator = Self::new();
        for reply in replies {
            generator.push_text(reply);
        }
        generator
    }

    /// Sleeps this long before answering each call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.lock_replies().push_back(Ok(text.into()));
    }

    pub fn push_error(&self, error: LlmError) {
        self.lock_replies().push_back(Err(error));
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lock_replies().len()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, LlmError>>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, web_search: bool) -> Result<String, LlmError> {
        let call = {
            let mut calls = self.calls.lock().unwrap_or_else(PoisonError::into_inner);
            calls.push(RecordedCall {
                prompt: prompt.to_string(),
                web_search,
            });
            calls.len()
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.lock_replies().pop_front();
        reply.unwrap_or(Err(LlmError::ScriptExhausted { call }))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
