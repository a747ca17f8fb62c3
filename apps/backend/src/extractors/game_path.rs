use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::session::GameKind;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Game kind taken from the `{game}` path segment.
///
/// Only the exact wire names are accepted; anything else, aliases included,
/// is a 404 `UNKNOWN_GAME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamePath(pub GameKind);

impl FromRequest for GamePath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_game(req.match_info().get("game")))
    }
}

fn parse_game(segment: Option<&str>) -> Result<GamePath, AppError> {
    let segment =
        segment.ok_or_else(|| AppError::bad_request(ErrorCode::BadRequest, "Missing game parameter"))?;

    GameKind::from_path_segment(segment).map(GamePath).ok_or_else(|| {
        let known: Vec<&str> = GameKind::ALL.iter().map(GameKind::as_str).collect();
        AppError::not_found(
            ErrorCode::UnknownGame,
            format!("Unknown game '{segment}'; expected one of {}", known.join(", ")),
        )
    })
}
