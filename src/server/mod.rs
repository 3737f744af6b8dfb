pub mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::{error, info};

use crate::config::{Config, DEFAULT_PORT};
use crate::gemini::TextGenerator;

const DEFAULT_WORKER_COUNT: usize = 4;

/// Shared, read-only per-process state. The generator is `None` when the
/// client could not be constructed at startup; requests then answer with a
/// configuration error instead of failing the process.
pub struct AppState {
    pub config: Config,
    pub generator: Option<Arc<dyn TextGenerator>>,
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate", web::post().to(handlers::generate))
        .route("/health", web::get().to(handlers::health));
}

pub async fn run(config: Config, generator: Option<Arc<dyn TextGenerator>>) -> Result<(), String> {
    let port = config.port.unwrap_or(DEFAULT_PORT);

    let app_state = web::Data::new(AppState { config, generator });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(("127.0.0.1", port))
    .map_err(|e| format!("Failed to bind server: {e}"))?
    .run();

    info!("Web service listening on http://127.0.0.1:{port}");

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(format!("Web server error: {e}"));
    }

    Ok(())
}
