//! LinkService tests against the in-memory store
//!
//! Focus on concurrent use: many callers share one service the way actix
//! workers do.

use std::collections::HashSet;
use std::sync::Arc;

use linkmeter::config::ShortenerConfig;
use linkmeter::errors::LinkmeterError;
use linkmeter::metrics_core::NoopMetrics;
use linkmeter::services::LinkService;
use linkmeter::storage::{LinkStore, MemoryStore};
use linkmeter::utils::CODE_ALPHABET;

fn shared_service(config: ShortenerConfig) -> (Arc<LinkService>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let service = Arc::new(LinkService::new(
        store.clone(),
        NoopMetrics::arc(),
        &config,
    ));
    (service, store)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shorten_yields_distinct_codes() {
    let (service, store) = shared_service(ShortenerConfig::default());

    let mut handles = Vec::new();
    for i in 0..200 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .shorten(&format!("https://example.com/{}", i))
                .await
                .unwrap()
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        let link = handle.await.unwrap();
        assert!(codes.insert(link.code.clone()), "duplicate code {}", link.code);
    }

    assert_eq!(store.len().await, 200);
    let all = service.list_all().await;
    for code in &codes {
        assert!(all.contains_key(code));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shorten_fills_small_space_exactly() {
    // 长度 1 只有 62 个短码：并发填满后不能有任何覆盖
    let (service, store) = shared_service(ShortenerConfig {
        code_length: 1,
        max_attempts: 100_000,
        ..ShortenerConfig::default()
    });

    let mut handles = Vec::new();
    for i in 0..62 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let url = format!("https://e{}.com", i);
            let link = service.shorten(&url).await.unwrap();
            (link.code, url)
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert_eq!(store.len().await, 62);
    for (code, url) in &results {
        assert_eq!(store.get(code).await.as_deref(), Some(url.as_str()));
    }

    let err = service.shorten("https://one-too-many.com").await.unwrap_err();
    assert!(matches!(err, LinkmeterError::ResourceExhausted(_)));
}

#[tokio::test]
async fn test_reserved_code_skipped_when_it_is_the_only_other_gap() {
    // 长度 3 的空间里只留下 "api" 和一个空位：
    // 分配结果只能是这个空位，"api" 即使被抽中也必须跳过
    let (service, store) = shared_service(ShortenerConfig {
        code_length: 3,
        max_attempts: 50_000_000,
        ..ShortenerConfig::default()
    });
    let free = "zz9";

    for &a in CODE_ALPHABET.iter() {
        for &b in CODE_ALPHABET.iter() {
            for &c in CODE_ALPHABET.iter() {
                let code = String::from_utf8(vec![a, b, c]).unwrap();
                if code != "api" && code != free {
                    store.put(&code, "https://taken.com").await;
                }
            }
        }
    }

    let link = service.shorten("https://example.com").await.unwrap();
    assert_eq!(link.code, free);
    assert!(!store.contains("api").await);

    // 空间已满，只剩保留字
    let bounded = LinkService::new(
        store.clone(),
        NoopMetrics::arc(),
        &ShortenerConfig {
            code_length: 3,
            max_attempts: 1_000,
            ..ShortenerConfig::default()
        },
    );
    let err = bounded.shorten("https://again.com").await.unwrap_err();
    assert!(matches!(err, LinkmeterError::ResourceExhausted(_)));
    assert!(!store.contains("api").await);
}

#[tokio::test]
async fn test_resolve_after_delete_is_not_found() {
    let (service, store) = shared_service(ShortenerConfig::default());

    let link = service.shorten("https://example.com").await.unwrap();
    service.delete(&link.code).await.unwrap();

    assert!(store.is_empty().await);
    assert!(matches!(
        service.resolve(&link.code).await,
        Err(LinkmeterError::NotFound(_))
    ));
}
