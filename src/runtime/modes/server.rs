//! Server mode
//!
//! Builds the actix-web app around the combs routes and runs it until
//! Ctrl-C, then closes the database pool.

use std::time::Duration;

use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::api::services::{combs_routes, json_config};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Upper bound on actix workers regardless of `server.cpu_count`
const MAX_WORKERS: usize = 32;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let storage = startup.storage.clone();
    let comb_service = web::Data::new(startup.comb_service);
    let honey_service = web::Data::new(startup.honey_service);

    let workers = config.server.cpu_count.clamp(1, MAX_WORKERS);
    warn!("Using {} CPU cores for the server", workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware) // 在 RequestId 之内，日志带上 request_id
            .wrap(RequestIdMiddleware) // 为每个请求生成 request_id
            .wrap(Compress::default())
            .app_data(comb_service.clone())
            .app_data(honey_service.clone())
            .app_data(json_config())
            .service(combs_routes())
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .disable_signals()
    .workers(workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    warn!("Starting server at http://{}", bind_address);

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        lifetime::shutdown::wait_for_signal().await;
        handle.stop(true).await;
    });

    server.await.context("HTTP server error")?;

    lifetime::shutdown::close_storage(&storage).await;
    warn!("Graceful shutdown complete");
    Ok(())
}
