//! Game turn endpoints.
//!
//! Every turn answers HTTP 200 with a turn result, including turn failures
//! (`status: "error"`). Only malformed requests produce problem+json.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{GamePath, ValidatedJson};
use crate::state::app_state::AppState;

/// Body shared by `play`, `resume` and `route`.
///
/// Fields are camelCase with snake_case aliases. Blank strings count as
/// absent for `sessionId` and `declaredGame`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    #[serde(default, alias = "session_id")]
    pub session_id: Option<String>,
    #[serde(default, alias = "declared_game", alias = "route_to")]
    pub declared_game: Option<String>,
    #[serde(default, alias = "user_input")]
    pub user_input: Option<String>,
}

impl TurnRequest {
    fn session_id(&self) -> Option<&str> {
        non_blank(self.session_id.as_deref())
    }

    fn declared_game(&self) -> Option<&str> {
        non_blank(self.declared_game.as_deref())
    }

    fn user_input(&self) -> Option<&str> {
        self.user_input.as_deref()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// POST /api/{game}/play
async fn play(
    game: GamePath,
    body: ValidatedJson<TurnRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let GamePath(game) = game;
    if let Some(declared) = body.declared_game() {
        if declared != game.as_str() {
            debug!(game = %game, declared, "declared game differs from path; path wins");
        }
    }

    let result = app_state
        .orchestrator()
        .play(game, body.session_id(), body.user_input())
        .await;

    Ok(HttpResponse::Ok().json(result))
}

/// POST /api/{game}/resume
async fn resume(
    game: GamePath,
    body: ValidatedJson<TurnRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let GamePath(game) = game;
    let session_id = body.session_id().ok_or_else(|| {
        AppError::invalid(ErrorCode::MissingSessionId, "sessionId is required to resume")
    })?;
    let user_input = body.user_input().ok_or_else(|| {
        AppError::invalid(ErrorCode::MissingUserInput, "userInput is required to resume")
    })?;

    let result = app_state
        .orchestrator()
        .resume(game, session_id, user_input)
        .await;

    Ok(HttpResponse::Ok().json(result))
}

/// POST /api/route
async fn route(
    body: ValidatedJson<TurnRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .orchestrator()
        .route(body.session_id(), body.declared_game(), body.user_input())
        .await;

    Ok(HttpResponse::Ok().json(result))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/route", web::post().to(route))
        .route("/{game}/play", web::post().to(play))
        .route("/{game}/resume", web::post().to(resume));
}
