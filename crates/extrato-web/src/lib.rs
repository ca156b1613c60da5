//! Actix-Web upload UI and API for bank statement extraction.
//!
//! Serves an upload form, renders the consolidated table with its summary
//! metrics and balance chart, and hands out the xlsx workbook.

mod error;
mod handlers;
mod models;
mod page;
mod upload;

use std::sync::Mutex;

use actix_web::{middleware, web, App, HttpServer};
use extrato_core::{ExtratoConfig, StatementCache};
use tracing::info;

pub use error::WebError;
pub use models::{ApiHealth, ApiProcessResponse};

/// Shared application state.
pub struct AppState {
    /// Loaded configuration.
    pub config: ExtratoConfig,
    /// Records of files already processed by this server.
    cache: Option<Mutex<StatementCache>>,
}

impl AppState {
    pub fn new(config: ExtratoConfig) -> Self {
        let cache = config
            .processing
            .cache_enabled
            .then(|| Mutex::new(StatementCache::new(config.processing.cache_capacity)));
        Self { config, cache }
    }

    /// The shared cache, if caching is enabled.
    pub(crate) fn cache(&self) -> Option<&Mutex<StatementCache>> {
        self.cache.as_ref()
    }
}

/// Register every route on an app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/process", web::post().to(handlers::process))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/process", web::post().to(handlers::api_process))
                .route("/export", web::post().to(handlers::api_export)),
        );
}

/// Run the server until it is stopped.
pub async fn run(config: ExtratoConfig) -> std::io::Result<()> {
    let bind_addr = config.server.bind_addr.clone();
    let port = config.server.port;
    let state = web::Data::new(AppState::new(config));

    info!("Starting server on http://{bind_addr}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
