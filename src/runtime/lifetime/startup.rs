use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::services::{CombService, HoneyService};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub comb_service: CombService,
    pub honey_service: HoneyService,
}

/// 准备服务器启动的上下文：连接数据库、运行迁移、构建服务
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    storage
        .ping()
        .await
        .context("Database is not reachable")?;

    let comb_service = CombService::new(storage.clone());
    let honey_service = HoneyService::new(storage.clone(), config.visits);
    info!(
        "Visit counting: {}",
        if config.visits.atomic_increment {
            "atomic increment"
        } else {
            "read-then-write"
        }
    );

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        storage,
        comb_service,
        honey_service,
    })
}
