//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_web::{
    App, HttpServer,
    middleware::{DefaultHeaders, from_fn},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::json_config;
use crate::api::middleware::{TimingMiddleware, request_id_middleware};
use crate::api::services::{AppStartTime, configure_routes};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// This function:
/// 1. Records startup time
/// 2. Prepares server components (store, metrics, link service)
/// 3. Configures and starts the HTTP server
/// 4. Listens for graceful shutdown signals
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime::now();

    let startup = lifetime::startup::prepare_server_startup(config).map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;

    let link_service = startup.link_service.clone();
    let recorder = startup.recorder.clone();
    let short_url_base = startup.short_url_base.clone();
    #[cfg(feature = "metrics")]
    let metrics = startup.metrics.clone();

    let workers = config.server.workers.clamp(1, 32);
    warn!("Using {} workers for the server", workers);

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(TimingMiddleware::new(recorder.clone())) // 记录请求数量与延迟
            .wrap(from_fn(request_id_middleware)) // 为每个请求分配 request_id
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .app_data(json_config())
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::Data::new(short_url_base.clone()));

        #[cfg(feature = "metrics")]
        let app = app.app_data(web::Data::new(metrics.clone()));

        app.configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // Wait for server or shutdown signal
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(startup.link_service.clone()) => {
            warn!("Graceful shutdown: done");
        }
    }

    Ok(())
}
