//! Fake text generators for tests.
//!
//! All fakes count calls so tests can pin how often the word game consults
//! the collaborator.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::generator::{GenerateError, TextGenerator};

/// Replies with scripted responses in order, repeating the last one once the
/// script runs out. Records every prompt it receives.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    last: Mutex<Option<String>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Questions reply followed by a guess naming `word`.
    pub fn for_word(word: &str) -> Self {
        Self::new([
            "1. Is it something you can eat?\n2. Is it found indoors?\n3. Is it made of wood?\n4. Can you hold it in your hand?\n5. Is it used for writing?".to_string(),
            format!("Based on your answers, I think your word is {word}"),
        ])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(prompt.to_string());

        let next = self.replies.lock().pop_front();
        let mut last = self.last.lock();
        if let Some(reply) = next {
            *last = Some(reply);
        }
        last.clone().ok_or(GenerateError::Empty)
    }
}

/// Always fails with a transport error.
#[derive(Default)]
pub struct FailingGenerator {
    calls: AtomicUsize,
}

impl FailingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GenerateError::Transport("connection refused".to_string()))
    }
}

/// Sleeps for `delay` before answering; used to exercise timeouts.
pub struct SlowGenerator {
    delay: Duration,
}

impl SlowGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl TextGenerator for SlowGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        tokio::time::sleep(self.delay).await;
        Ok("Is it slow?".to_string())
    }
}

/// Blocks every call until the test releases it, then delegates to an
/// inner scripted generator. Used to hold a turn mid-flight.
pub struct GatedGenerator {
    gate: Semaphore,
    entered: Semaphore,
    inner: ScriptedGenerator,
}

impl GatedGenerator {
    pub fn new(inner: ScriptedGenerator) -> Self {
        Self {
            gate: Semaphore::new(0),
            entered: Semaphore::new(0),
            inner,
        }
    }

    /// Let one pending or future call proceed.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Wait until a call has reached the gate.
    pub async fn wait_entered(&self) {
        if let Ok(permit) = self.entered.acquire().await {
            permit.forget();
        }
    }

    pub fn calls(&self) -> usize {
        self.inner.calls()
    }
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        self.entered.add_permits(1);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| GenerateError::Transport(e.to_string()))?;
        permit.forget();
        self.inner.generate(prompt).await
    }
}
