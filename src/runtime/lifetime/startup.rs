use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::analytics::{CollateralCatalog, EngagementAggregator};
use crate::storage::{EngagementStore, SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub aggregator: Arc<EngagementAggregator>,
}

/// 安装 rustls 加密提供者（MySQL / PostgreSQL TLS 连接需要）
fn install_crypto_provider() -> Result<()> {
    if rustls::crypto::CryptoProvider::get_default().is_some() {
        return Ok(());
    }
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install rustls crypto provider: {:?}", e))
}

/// 连接存储、加载素材目录，返回存储与聚合器
async fn build_context() -> Result<StartupContext> {
    install_crypto_provider()?;

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let catalog = CollateralCatalog::load(storage.as_ref())
        .await
        .context("Failed to load collateral catalog")?;
    if catalog.is_empty() {
        warn!("Collateral catalog is empty, reports will use generated titles");
    } else {
        debug!("Collateral catalog loaded with {} entries", catalog.len());
    }

    let store: Arc<dyn EngagementStore> = storage.clone();
    let aggregator = Arc::new(EngagementAggregator::new(store, Arc::new(catalog)));

    Ok(StartupContext {
        storage,
        aggregator,
    })
}

/// CLI 模式只需要聚合器
pub async fn build_aggregator() -> Result<Arc<EngagementAggregator>> {
    Ok(build_context().await?.aggregator)
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let context = build_context().await?;

    let config = crate::config::get_config();
    if config.server.cors_origins.is_empty() {
        info!("CORS disabled, API is same-origin only");
    } else {
        info!("CORS enabled for origins: {:?}", config.server.cors_origins);
    }
    info!(
        "Report windows: trend {} days, recent {} days, export limit {} rows",
        config.reports.trend_days, config.reports.recent_days, config.reports.export_row_limit
    );

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );
    Ok(context)
}
