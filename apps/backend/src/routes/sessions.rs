use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::session_store::StoreError;
use crate::state::app_state::AppState;

/// GET /api/sessions/{id}
///
/// Diagnostics snapshot of a live session. The body is a copy; nothing here
/// writes to the store.
async fn get_session(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let session = app_state
        .sessions()
        .get(&id)
        .await
        .map_err(|StoreError::NotFound(id)| {
            AppError::not_found(
                ErrorCode::SessionNotFound,
                format!("Session {id} not found or expired"),
            )
        })?;

    Ok(HttpResponse::Ok().json(session))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/sessions/{id}", web::get().to(get_session));
}
