//! Lookup from `GameKind` to its state machine.

use std::sync::Arc;
use std::time::Duration;

use super::{NumberGame, SuspendableGame, WordGame};
use crate::domain::session::GameKind;
use crate::generator::TextGenerator;

/// One instance of every game, shared by all turns.
#[derive(Clone)]
pub struct GameRegistry {
    number: Arc<NumberGame>,
    word: Arc<WordGame>,
}

impl GameRegistry {
    pub fn new(generator: Arc<dyn TextGenerator>, generator_timeout: Duration) -> Self {
        Self {
            number: Arc::new(NumberGame::new()),
            word: Arc::new(WordGame::new(generator, generator_timeout)),
        }
    }

    pub fn get(&self, kind: GameKind) -> &dyn SuspendableGame {
        match kind {
            GameKind::NumberGame => self.number.as_ref(),
            GameKind::WordGame => self.word.as_ref(),
        }
    }
}
