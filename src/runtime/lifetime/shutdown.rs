use std::sync::Arc;

use tokio::signal;
use tracing::{error, warn};

use crate::storage::Storage;

pub async fn listen_for_shutdown() {
    // 等待 Ctrl+C 信号
    signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
    warn!("Shutdown signal received, initiating graceful shutdown...");
}

/// 关闭存储连接池
pub async fn close_storage(storage: Arc<dyn Storage>) {
    match storage.close().await {
        Ok(()) => warn!("Storage connections closed"),
        Err(e) => error!("Failed to close storage: {e}"),
    }
}
