//! Link storage
//!
//! The store is a passive key/value container: short code -> long URL.
//! Uniqueness is the caller's job, which is why `insert_if_absent` exists as
//! a single atomic step.

use std::collections::BTreeMap;

use async_trait::async_trait;

pub mod memory;

pub use memory::MemoryStore;

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// 是否存在该短码
    async fn contains(&self, code: &str) -> bool;

    /// 插入或覆盖，不做唯一性检查
    async fn put(&self, code: &str, url: &str);

    /// 原子地“检查并插入”
    ///
    /// 返回 `true` 表示新建成功，`false` 表示短码已被占用（原值不变）。
    async fn insert_if_absent(&self, code: &str, url: &str) -> bool;

    async fn get(&self, code: &str) -> Option<String>;

    /// 当前所有条目的快照，按短码排序
    async fn all(&self) -> BTreeMap<String, String>;

    /// 删除短码，返回是否存在过
    async fn remove(&self, code: &str) -> bool;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
