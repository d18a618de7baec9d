use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::api::services::ShortUrlBase;
use crate::config::StaticConfig;
use crate::metrics_core::MetricsRecorder;
use crate::services::LinkService;
use crate::storage::{LinkStore, MemoryStore};

#[cfg(feature = "metrics")]
use crate::metrics::Metrics;

#[cfg(not(feature = "metrics"))]
use crate::metrics_core::NoopMetrics;

/// 启动后共享给所有 worker 的组件
#[derive(Clone)]
pub struct StartupContext {
    pub link_service: Arc<LinkService>,
    pub recorder: Arc<dyn MetricsRecorder>,
    #[cfg(feature = "metrics")]
    pub metrics: Arc<Metrics>,
    pub short_url_base: ShortUrlBase,
}

/// 准备服务器启动的上下文
/// 包括存储、指标和链接服务
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    #[cfg(feature = "metrics")]
    let metrics = Arc::new(Metrics::new().context("Failed to create metrics registry")?);
    #[cfg(feature = "metrics")]
    let recorder: Arc<dyn MetricsRecorder> = metrics.clone();
    #[cfg(not(feature = "metrics"))]
    let recorder: Arc<dyn MetricsRecorder> = NoopMetrics::arc();

    let store: Arc<dyn LinkStore> = Arc::new(MemoryStore::new());
    info!("Using storage backend: memory");

    let link_service = Arc::new(LinkService::new(
        store,
        recorder.clone(),
        &config.shortener,
    ));
    debug!(
        "LinkService ready (code_length={}, max_attempts={})",
        config.shortener.code_length, config.shortener.max_attempts
    );

    let short_url_base = ShortUrlBase(
        config
            .shortener
            .public_base_url
            .as_ref()
            .map(|b| b.trim_end_matches('/').to_string()),
    );

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        link_service,
        recorder,
        #[cfg(feature = "metrics")]
        metrics,
        short_url_base,
    })
}
