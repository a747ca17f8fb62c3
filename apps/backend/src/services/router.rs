//! Target resolution for brand-new sessions.
//!
//! Only consulted when no live session exists for the request. A resumed
//! session always keeps the game kind it was created with.

use crate::domain::session::GameKind;

/// Where a new-session request should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Game(GameKind),
    EndGame,
}

impl Route {
    pub fn from_declared(declared: &str) -> Option<Self> {
        let declared = declared.trim().to_lowercase();
        if matches!(declared.as_str(), "end_game" | "end-game" | "end") {
            return Some(Route::EndGame);
        }
        GameKind::from_slug(&declared).map(Route::Game)
    }
}

const WORD_KEYWORDS: &[&str] = &["word game", "word guessing", "word"];
const NUMBER_KEYWORDS: &[&str] = &["number game", "number guessing", "number", "guess"];
const END_KEYWORDS: &[&str] = &["end", "quit", "stop", "exit"];

/// Declared target first, then keywords in the free text, then the number game.
///
/// An unrecognised declared value is ignored rather than rejected.
pub fn resolve_route(declared: Option<&str>, user_input: Option<&str>) -> Route {
    if let Some(route) = declared.and_then(Route::from_declared) {
        return route;
    }

    let Some(text) = user_input.map(normalize_words) else {
        return Route::Game(GameKind::NumberGame);
    };

    if mentions_any(&text, WORD_KEYWORDS) {
        Route::Game(GameKind::WordGame)
    } else if mentions_any(&text, NUMBER_KEYWORDS) {
        Route::Game(GameKind::NumberGame)
    } else if mentions_any(&text, END_KEYWORDS) {
        Route::EndGame
    } else {
        Route::Game(GameKind::NumberGame)
    }
}

/// Lower-case, split on anything that is not alphanumeric, re-join with single
/// spaces and pad so keywords match on word boundaries.
fn normalize_words(text: &str) -> String {
    let words: Vec<&str> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    format!(" {} ", words.join(" ").to_lowercase())
}

fn mentions_any(padded: &str, keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|keyword| padded.contains(&format!(" {keyword} ")))
}
