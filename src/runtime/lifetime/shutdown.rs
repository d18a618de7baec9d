use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

use crate::services::LinkService;

/// 等待 Ctrl+C，然后记录关闭时的状态
///
/// 存储只在内存中，关闭时不需要刷盘。
pub async fn listen_for_shutdown(link_service: Arc<LinkService>) {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }

    info!(
        "Shutting down with {} links in memory (discarded)",
        link_service.count().await
    );
}
