use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 统计基础数据，便于确认连接的数据库
async fn log_storage_summary(storage: &Arc<dyn Storage>) {
    match (storage.list_majors().await, storage.list_evaluations().await) {
        (Ok(majors), Ok(evaluations)) => {
            info!(
                "Storage ready: {} major(s), {} evaluation(s)",
                majors.len(),
                evaluations.len()
            );
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Failed to summarize storage contents: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 根据配置创建存储并完成数据库迁移
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    log_storage_summary(&storage).await;

    Ok(StartupContext { storage })
}
