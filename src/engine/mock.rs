use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use super::llm_client::{InferenceError, TextCompleter};

/// One recorded call to [`MockCompleter::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCall {
    pub prompt: String,
    pub max_new_tokens: u32,
}

/// Completer with scripted replies, for tests and offline runs.
pub struct MockCompleter {
    script: Mutex<VecDeque<String>>,
    repeat: Option<String>,
    failure: Option<String>,
    calls: Mutex<Vec<CompletionCall>>,
}

impl MockCompleter {
    /// Replies with `reply` to every prompt.
    pub fn fixed(reply: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(reply.into()),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Replies with each entry once, in order, then fails.
    pub fn sequence<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(replies.into_iter().map(Into::into).collect()),
            repeat: None,
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            repeat: None,
            failure: Some(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CompletionCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TextCompleter for MockCompleter {
    fn complete(&self, prompt: &str, max_new_tokens: u32) -> Result<String, InferenceError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(CompletionCall {
                prompt: prompt.to_string(),
                max_new_tokens,
            });

        if let Some(message) = &self.failure {
            return Err(InferenceError::Backend(message.clone()));
        }

        let scripted = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        scripted
            .or_else(|| self.repeat.clone())
            .ok_or_else(|| InferenceError::Backend("mock completer has no replies left".into()))
    }

    fn check_connection(&self) -> Result<String, InferenceError> {
        match &self.failure {
            Some(message) => Err(InferenceError::Backend(message.clone())),
            None => Ok("Mock completer ready".to_string()),
        }
    }
}
