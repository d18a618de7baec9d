//! Link service
//!
//! Owns the short-code allocation loop and the business counters. The store
//! and the metrics recorder are injected at construction time.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, trace, warn};

use crate::config::ShortenerConfig;
use crate::errors::{LinkmeterError, Result};
use crate::metrics_core::MetricsRecorder;
use crate::storage::LinkStore;
use crate::utils::{generate_random_code, is_reserved_short_code};

/// 缺少长链接时返回给调用方的消息
pub const MISSING_URL_MESSAGE: &str = "URL longa não fornecida";

/// 短码不存在时返回给调用方的消息
pub const NOT_FOUND_MESSAGE: &str = "URL curta não encontrada";

/// Result of a successful shorten call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedLink {
    pub code: String,
    pub long_url: String,
}

impl ShortenedLink {
    /// Build the fully-qualified short URL from a base such as `http://host:port`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.code)
    }
}

/// Service for link operations
pub struct LinkService {
    store: Arc<dyn LinkStore>,
    metrics: Arc<dyn MetricsRecorder>,
    code_length: usize,
    max_attempts: usize,
}

impl LinkService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        metrics: Arc<dyn MetricsRecorder>,
        config: &ShortenerConfig,
    ) -> Self {
        Self {
            store,
            metrics,
            code_length: config.code_length.max(1),
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Create a short code for `long_url`.
    ///
    /// Candidates are drawn until one is free; the free check and the insert
    /// happen as one atomic store operation. Reserved route names count as
    /// taken. Gives up with `ResourceExhausted` after `max_attempts` draws.
    pub async fn shorten(&self, long_url: &str) -> Result<ShortenedLink> {
        // 只拒绝空串，内容本身不做任何校验
        if long_url.is_empty() {
            return Err(LinkmeterError::invalid_request(MISSING_URL_MESSAGE));
        }

        for attempt in 1..=self.max_attempts {
            let candidate = generate_random_code(self.code_length);

            if is_reserved_short_code(&candidate) {
                trace!("LinkService: skipped reserved code '{}'", candidate);
                continue;
            }

            if self.store.insert_if_absent(&candidate, long_url).await {
                self.metrics.inc_links_created();
                info!(
                    "LinkService: created link '{}' -> '{}' (attempt {})",
                    candidate, long_url, attempt
                );
                return Ok(ShortenedLink {
                    code: candidate,
                    long_url: long_url.to_owned(),
                });
            }

            debug!("LinkService: code collision on '{}', retrying", candidate);
        }

        warn!(
            "LinkService: no free code of length {} after {} attempts",
            self.code_length, self.max_attempts
        );
        Err(LinkmeterError::resource_exhausted(format!(
            "Não foi possível gerar um código único após {} tentativas",
            self.max_attempts
        )))
    }

    /// Look up the long URL for `code`; counts a redirect on hit only.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        self.resolve_with(code, |url| Ok(url.to_owned())).await
    }

    /// Look up `code` and turn the stored URL into `T` with `build`.
    ///
    /// The redirect counter moves only when both the lookup and `build`
    /// succeed, so a target that cannot be served is never counted.
    pub async fn resolve_with<T, F>(&self, code: &str, build: F) -> Result<T>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        let Some(url) = self.store.get(code).await else {
            debug!("LinkService: code '{}' not found", code);
            return Err(LinkmeterError::not_found(NOT_FOUND_MESSAGE));
        };

        let target = build(&url).inspect_err(|e| {
            warn!("LinkService: cannot serve target of '{}': {}", code, e);
        })?;

        self.metrics.inc_redirects();
        trace!("LinkService: resolved '{}' -> '{}'", code, url);
        Ok(target)
    }

    /// Snapshot of every stored link, ordered by code
    pub async fn list_all(&self) -> BTreeMap<String, String> {
        self.store.all().await
    }

    pub async fn delete(&self, code: &str) -> Result<()> {
        if self.store.remove(code).await {
            info!("LinkService: deleted '{}'", code);
            Ok(())
        } else {
            Err(LinkmeterError::not_found(NOT_FOUND_MESSAGE))
        }
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }
}
