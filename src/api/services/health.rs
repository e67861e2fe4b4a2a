use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, trace};

use crate::analytics::EngagementAggregator;
use crate::api::services::campaigns::{ErrorCode, HealthResponse, json_response};

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Health Service
///
/// 直接 ping 存储，不经过聚合查询。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        aggregator: web::Data<Arc<EngagementAggregator>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received health check request");

        let store = aggregator.store();
        let (store_status, error) =
            match tokio::time::timeout(Duration::from_secs(5), store.ping()).await {
                Ok(Ok(())) => ("healthy".to_string(), None),
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    ("unhealthy".to_string(), Some(format!("database error: {}", e)))
                }
                Err(_) => {
                    error!("Storage health check timeout");
                    ("unhealthy".to_string(), Some("timeout".to_string()))
                }
            };

        let healthy = error.is_none();
        let uptime = chrono::Utc::now() - app_start_time.start_datetime;
        let response = HealthResponse {
            status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
            backend: store.backend_name().to_string(),
            store: store_status,
            error,
            catalog_entries: aggregator.catalog().len(),
            uptime_seconds: uptime.num_seconds(),
            response_time_ms: start_time.elapsed().as_millis() as u64,
        };

        let (status, code, message) = if healthy {
            (StatusCode::OK, ErrorCode::Success, "OK")
        } else {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorCode::ServiceUnavailable,
                "Store unavailable",
            )
        };
        json_response(status, code, message, Some(response))
    }
}

/// 健康检查路由 `/health`
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
