use actix_web::web;

pub mod games;
pub mod health;
pub mod sessions;

/// Register every application route.
///
/// `main.rs` adds CORS and the tracing middleware around this; tests mount
/// it directly so endpoint behavior can be exercised without them.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Root and health: /, /health
    cfg.configure(health::configure_routes);

    // Diagnostics and game turns: /api/sessions/{id}, /api/route, /api/{game}/**
    cfg.service(
        web::scope("/api")
            .configure(sessions::configure_routes)
            .configure(games::configure_routes),
    );
}
