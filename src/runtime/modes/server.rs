//! Server mode
//!
//! This module contains the HTTP server startup logic.
//! It configures and starts the HTTP server with all necessary routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::middleware::RequestIdMiddleware;
use crate::api::services::{AppStartTime, api_v1_routes, health_routes};
use crate::runtime::lifetime;

/// Build CORS middleware from `server.cors_origins`
///
/// 空列表保持浏览器默认同源策略；`*` 允许任意来源。
fn build_cors_middleware(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::HEAD, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![
            header::CONTENT_DISPOSITION,
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let aggregator = startup.aggregator.clone();
    let db_for_shutdown = startup.storage.get_db().clone();

    let config = crate::config::get_config();
    let workers = config.server.workers.clamp(1, 32);
    let cors_origins = config.server.cors_origins.clone();
    warn!("Using {} workers for the server", workers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(build_cors_middleware(&cors_origins))
            .wrap(Compress::default())
            .app_data(web::Data::new(aggregator.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .service(api_v1_routes())
            .service(health_routes())
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    // 等待服务器退出或关闭信号
    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&db_for_shutdown) => {
            warn!("Graceful shutdown completed");
        }
    }

    Ok(())
}
