use actix_web::{web, App, HttpServer};
use panel_backend::config::{GameConfig, ServerConfig, StoreConfig};
use panel_backend::infra::state::build_state;
use panel_backend::middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
use panel_backend::routes;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (container env, or `set -a; . ./.env; set +a` locally).
    let (server, game, store) = match (
        ServerConfig::from_env(),
        GameConfig::from_env(),
        StoreConfig::from_env(),
    ) {
        (Ok(server), Ok(game), Ok(store)) => (server, game, store),
        (server, game, store) => {
            for err in [server.err(), game.err(), store.err()].into_iter().flatten() {
                error!(error = %err, "invalid configuration");
            }
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, ?store, "starting panel backend");

    let app_state = build_state()
        .with_game(game)
        .with_store_config(store)
        .build()
        .await;
    if !app_state.is_connected() {
        warn!("spreadsheet not connected; store-backed endpoints will fail");
    }

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
