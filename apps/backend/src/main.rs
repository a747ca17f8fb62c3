use actix_web::{web, App, HttpServer};
use game_hub::config::Config;
use game_hub::infra::state::build_state;
use game_hub::middleware::cors::cors_middleware;
use game_hub::middleware::request_trace::RequestTrace;
use game_hub::middleware::structured_logger::StructuredLogger;
use game_hub::middleware::trace_span::TraceSpan;
use game_hub::routes;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or `set -a; . ./.env; set +a` locally).
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_config(&config).build() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        idle_timeout_secs = config.session_idle_timeout.as_secs(),
        generator_model = %config.generator.model,
        "starting game hub"
    );

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
