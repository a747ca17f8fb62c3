//! Turn orchestration: the only writer of the session store.
//!
//! Every turn runs under the per-id store guard, from the read of the stored
//! session through the game step to the write (or delete) of the result. Two
//! turns on the same id are therefore applied one at a time in arrival order.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::router::{resolve_route, Route};
use super::session_store::{SessionGuard, SessionStore};
use super::stats::GameStats;
use crate::domain::session::{GameKind, Session};
use crate::domain::turn::TurnResult;
use crate::errors::ErrorCode;
use crate::games::{GameRegistry, StepOutcome};

const UNKNOWN_SESSION_MESSAGE: &str =
    "Missing or invalid session. Please start a new game.";

pub struct TurnOrchestrator {
    store: Arc<SessionStore>,
    games: GameRegistry,
    stats: Arc<GameStats>,
}

impl TurnOrchestrator {
    pub fn new(store: Arc<SessionStore>, games: GameRegistry, stats: Arc<GameStats>) -> Self {
        Self {
            store,
            games,
            stats,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn stats(&self) -> &Arc<GameStats> {
        &self.stats
    }

    /// Start-or-continue entry point.
    ///
    /// A known session resumes with `user_input` (or re-states its prompt
    /// when there is none). An absent or unknown id starts a new `game`
    /// session under a fresh id; the input is ignored on that call.
    pub async fn play(
        &self,
        game: GameKind,
        session_id: Option<&str>,
        user_input: Option<&str>,
    ) -> TurnResult {
        if let Some(id) = session_id {
            let guard = self.store.lock(id).await;
            if guard.session().is_some() {
                return self.continue_session(guard, user_input).await;
            }
            debug!(session_id = %id, game = %game, "unknown session id on play; starting fresh");
        }
        self.start(game).await
    }

    /// Resume-only entry point.
    ///
    /// An unknown id is an `UNKNOWN_SESSION` failure, except for the number
    /// game, which creates a default session under the supplied id and feeds
    /// it the input straight away.
    pub async fn resume(&self, game: GameKind, session_id: &str, user_input: &str) -> TurnResult {
        let mut guard = self.store.lock(session_id).await;
        if guard.session().is_some() {
            return self.step(guard, user_input).await;
        }

        match game {
            GameKind::NumberGame => {
                info!(session_id = %session_id, game = %game, "resume of unknown session; creating default");
                let suspension = self.games.get(game).start();
                guard.put(Session::new(
                    session_id,
                    suspension.payload,
                    suspension.waiting_for,
                    suspension.prompt,
                ));
                self.stats.record_start(game);
                self.step(guard, user_input).await
            }
            GameKind::WordGame => {
                debug!(session_id = %session_id, game = %game, "resume of unknown session rejected");
                TurnResult::failed(
                    Some(session_id.to_string()),
                    Some(game),
                    ErrorCode::UnknownSession,
                    UNKNOWN_SESSION_MESSAGE.to_string(),
                )
            }
        }
    }

    /// Generic entry point: resume a known session, otherwise let the router
    /// pick a game (or end play) from the declared target and the free text.
    pub async fn route(
        &self,
        session_id: Option<&str>,
        declared: Option<&str>,
        user_input: Option<&str>,
    ) -> TurnResult {
        if let Some(id) = session_id {
            let guard = self.store.lock(id).await;
            if guard.session().is_some() {
                return self.continue_session(guard, user_input).await;
            }
        }

        match resolve_route(declared, user_input) {
            Route::Game(game) => self.start(game).await,
            Route::EndGame => {
                info!("player ended play");
                TurnResult::completed(None, None, self.stats.summary())
            }
        }
    }

    async fn start(&self, game: GameKind) -> TurnResult {
        self.store.sweep_expired();

        let id = Uuid::new_v4().to_string();
        let suspension = self.games.get(game).start();
        let prompt = suspension.prompt.clone();

        let mut guard = self.store.lock(&id).await;
        guard.put(Session::new(
            id.clone(),
            suspension.payload,
            suspension.waiting_for,
            suspension.prompt,
        ));
        self.stats.record_start(game);

        info!(session_id = %id, game = %game, "session started");
        TurnResult::awaiting(id, game, prompt)
    }

    async fn continue_session(
        &self,
        guard: SessionGuard<'_>,
        user_input: Option<&str>,
    ) -> TurnResult {
        match user_input {
            Some(input) => self.step(guard, input).await,
            None => match guard.session() {
                Some(session) => {
                    TurnResult::awaiting(session.id.clone(), session.game_kind, session.prompt.clone())
                }
                None => TurnResult::failed(
                    Some(guard.id().to_string()),
                    None,
                    ErrorCode::UnknownSession,
                    UNKNOWN_SESSION_MESSAGE.to_string(),
                ),
            },
        }
    }

    /// Feed one answer into the stored session and apply the outcome.
    async fn step(&self, mut guard: SessionGuard<'_>, input: &str) -> TurnResult {
        let Some(mut session) = guard.session().cloned() else {
            return TurnResult::failed(
                Some(guard.id().to_string()),
                None,
                ErrorCode::UnknownSession,
                UNKNOWN_SESSION_MESSAGE.to_string(),
            );
        };
        let id = session.id.clone();
        let game = session.game_kind;

        let outcome = self
            .games
            .get(game)
            .step(&session.payload, session.waiting_for, input)
            .await;

        match outcome {
            Ok(StepOutcome::Continue(next)) => {
                let prompt = next.prompt.clone();
                session.advance(next.payload, next.waiting_for, next.prompt);
                debug!(session_id = %id, game = %game, waiting_for = %session.waiting_for, turns = session.turns, "turn advanced");
                guard.put(session);
                TurnResult::awaiting(id, game, prompt)
            }
            Ok(StepOutcome::Done { final_message }) => {
                guard.delete();
                self.stats.record_completed();
                info!(session_id = %id, game = %game, turns = session.turns + 1, "session completed");
                TurnResult::completed(Some(id), Some(game), final_message)
            }
            Ok(StepOutcome::Invalid { retry_prompt }) => {
                guard.touch();
                debug!(session_id = %id, game = %game, waiting_for = %session.waiting_for, "input not understood");
                TurnResult::awaiting(id, game, retry_prompt)
            }
            Err(err) => {
                guard.delete();
                self.stats.record_failed();
                let code = err.code();
                warn!(session_id = %id, game = %game, code = %code, error = %err, "session failed");
                TurnResult::failed(Some(id), Some(game), code, err.player_message())
            }
        }
    }
}
