//! Session records held by the session store.
//!
//! A `Session` is the suspended execution state of one in-progress game: the
//! game kind, what kind of answer the game expects next, the outstanding
//! prompt and a game-specific payload. Only the turn orchestrator writes
//! sessions; every other reader gets a clone.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Which game a session is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    NumberGame,
    WordGame,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::NumberGame, GameKind::WordGame];

    /// Path segment and wire name, e.g. `number_game`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameKind::NumberGame => "number_game",
            GameKind::WordGame => "word_game",
        }
    }

    /// Exact match on the wire name; used for the `{game}` path segment.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == segment)
    }

    /// Lenient parse of a declared game name (`number`, `Word-Game`, ...).
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "number_game" | "number-game" | "number" => Some(GameKind::NumberGame),
            "word_game" | "word-game" | "word" => Some(GameKind::WordGame),
            _ => None,
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a session.
///
/// Stored sessions are always `AwaitingInput`: the orchestrator deletes a
/// session the moment it becomes `Completed` or `Failed`, so those two are
/// never observed in the store or in diagnostics snapshots. They stay in the
/// enum so the record describes the whole lifecycle; the outcome of a
/// terminal turn is reported through `TurnStatus` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    AwaitingInput,
    Completed,
    Failed,
}

/// What category of answer the game expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum WaitingFor {
    /// Waiting for the player to say "ready".
    Ready,
    /// Waiting for yes/no to "is it X?".
    YesNo,
    /// Waiting for higher/lower after a "no".
    HigherLower,
    /// Waiting for the answer to question `n` (1-based).
    Question(u8),
    /// Waiting for the player to confirm or reject the final guess.
    Verify,
}

impl fmt::Display for WaitingFor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitingFor::Ready => f.write_str("ready"),
            WaitingFor::YesNo => f.write_str("yes_no"),
            WaitingFor::HigherLower => f.write_str("higher_lower"),
            WaitingFor::Question(n) => write!(f, "question_{n}"),
            WaitingFor::Verify => f.write_str("verify"),
        }
    }
}

/// Binary-search state for the number game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberPayload {
    pub low: i32,
    pub high: i32,
    pub guess_count: u32,
    /// Informational log of `"{mid}: {answer}"` entries.
    #[serde(default)]
    pub history: Vec<String>,
}

/// Stage of the word game. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordStage {
    Welcome,
    Questioning,
    Verifying,
}

/// Attribute Q&A state for the word game.
///
/// `questions` is the plan obtained from the collaborator when questioning
/// starts (exactly five entries from then on). `asked_questions` and
/// `answers` are the answered pairs and always have equal length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPayload {
    pub stage: WordStage,
    pub questions_asked: u8,
    pub questions: Vec<String>,
    pub asked_questions: Vec<String>,
    pub answers: Vec<String>,
}

impl WordPayload {
    /// Answered (question, answer) pairs in the order they were asked.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.asked_questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| (q.as_str(), a.as_str()))
    }
}

/// Game-specific portion of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "snake_case")]
pub enum Payload {
    NumberGame(NumberPayload),
    WordGame(WordPayload),
}

impl Payload {
    pub fn kind(&self) -> GameKind {
        match self {
            Payload::NumberGame(_) => GameKind::NumberGame,
            Payload::WordGame(_) => GameKind::WordGame,
        }
    }
}

/// Suspended execution state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub game_kind: GameKind,
    pub status: SessionStatus,
    pub waiting_for: WaitingFor,
    /// The question currently outstanding, re-stated when asked again.
    pub prompt: String,
    pub payload: Payload,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub turns: u32,
}

impl Session {
    /// Create a fresh session awaiting input. The game kind is taken from the
    /// payload so the two can never disagree.
    pub fn new(
        id: impl Into<String>,
        payload: Payload,
        waiting_for: WaitingFor,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            game_kind: payload.kind(),
            status: SessionStatus::AwaitingInput,
            waiting_for,
            prompt: prompt.into(),
            payload,
            created_at: OffsetDateTime::now_utc(),
            turns: 0,
        }
    }

    /// Replace the suspended state after a successful step.
    pub fn advance(&mut self, payload: Payload, waiting_for: WaitingFor, prompt: String) {
        self.payload = payload;
        self.waiting_for = waiting_for;
        self.prompt = prompt;
        self.turns += 1;
    }
}
