//! Process-wide play counters reported when the player ends the session.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::domain::session::GameKind;

#[derive(Debug, Default)]
pub struct GameStats {
    number_started: AtomicU64,
    word_started: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub number_games: u64,
    pub word_games: u64,
    pub completed: u64,
    pub failed: u64,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&self, kind: GameKind) {
        let counter = match kind {
            GameKind::NumberGame => &self.number_started,
            GameKind::WordGame => &self.word_started,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            number_games: self.number_started.load(Ordering::Relaxed),
            word_games: self.word_started.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    /// Goodbye message for `end_game`.
    pub fn summary(&self) -> String {
        let s = self.snapshot();
        format!(
            "Thanks for playing!\n\n\
             You played the Number Guessing Game {} time(s).\n\
             You played the Word Guessing Game {} time(s).\n\
             Hope you had fun!",
            s.number_games, s.word_games,
        )
    }
}
