//! 翻译缓存模块
//!
//! 以 `(语言, 原文)` 为键保存译文。条目一旦写入就在进程生命周期内有效，
//! 没有过期也没有淘汰。底层存储通过 [`CacheStore`] 注入，默认是基于
//! `DashMap` 的内存存储，并发读写不需要全局锁。

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;

// ============================================================================
// 核心类型
// ============================================================================

/// 缓存键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub lang: String,
    pub text: String,
}

impl CacheKey {
    pub fn new(lang: &str, text: &str) -> Self {
        Self {
            lang: lang.to_string(),
            text: text.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lang, self.text)
    }
}

/// 缓存存储后端
///
/// 同一个键被并发写入时后写者胜出；同一对语言和原文的译文是等价的，
/// 所以覆盖是无害的。
pub trait CacheStore: Send + Sync {
    fn load(&self, key: &CacheKey) -> Option<String>;
    fn store(&self, key: CacheKey, translated: String);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 默认的内存存储
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<CacheKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn load(&self, key: &CacheKey) -> Option<String> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn store(&self, key: CacheKey, translated: String) {
        self.entries.insert(key, translated);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// 缓存统计信息快照
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub writes: u64,
    pub total_entries: usize,
}

#[derive(Debug, Default)]
struct CacheCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
}

/// 翻译缓存
///
/// 克隆得到的是同一份缓存的句柄。源语言的条目永远不会被写入。
#[derive(Clone)]
pub struct TranslationCache {
    store: Arc<dyn CacheStore>,
    source_lang: String,
    counters: Arc<CacheCounters>,
}

// ============================================================================
// 实现
// ============================================================================

impl TranslationCache {
    /// 创建使用内存存储的缓存
    pub fn new(source_lang: &str) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), source_lang)
    }

    /// 使用指定存储后端创建缓存
    pub fn with_store(store: Arc<dyn CacheStore>, source_lang: &str) -> Self {
        Self {
            store,
            source_lang: source_lang.to_string(),
            counters: Arc::new(CacheCounters::default()),
        }
    }

    /// 获取译文，计入命中统计
    pub fn get(&self, lang: &str, text: &str) -> Option<String> {
        let found = self.lookup(lang, text);
        if found.is_some() {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// 获取译文，不影响统计
    pub fn peek(&self, lang: &str, text: &str) -> Option<String> {
        self.lookup(lang, text)
    }

    /// 写入译文
    pub fn put(&self, lang: &str, text: &str, translated: &str) {
        if lang == self.source_lang {
            return;
        }

        self.store
            .store(CacheKey::new(lang, text), translated.to_string());
        self.counters.writes.fetch_add(1, Ordering::Relaxed);
    }

    /// 检查是否包含指定键
    pub fn contains(&self, lang: &str, text: &str) -> bool {
        self.lookup(lang, text).is_some()
    }

    /// 获取缓存大小
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn source_lang(&self) -> &str {
        &self.source_lang
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> CacheStats {
        let cache_hits = self.counters.hits.load(Ordering::Relaxed);
        let cache_misses = self.counters.misses.load(Ordering::Relaxed);
        CacheStats {
            total_requests: cache_hits + cache_misses,
            cache_hits,
            cache_misses,
            writes: self.counters.writes.load(Ordering::Relaxed),
            total_entries: self.store.len(),
        }
    }

    fn lookup(&self, lang: &str, text: &str) -> Option<String> {
        if lang == self.source_lang {
            return None;
        }
        self.store.load(&CacheKey::new(lang, text))
    }
}

impl fmt::Debug for TranslationCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationCache")
            .field("source_lang", &self.source_lang)
            .field("entries", &self.store.len())
            .finish()
    }
}

impl CacheStats {
    /// 计算缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_requests as f64
        }
    }
}
