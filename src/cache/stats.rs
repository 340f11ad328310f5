use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 缓存运行统计
///
/// 仅计数命中/未命中/写入/错误，供会话结束时输出一行摘要。
#[derive(Clone, Default)]
pub struct CacheStats {
    metrics: Arc<CacheMetrics>,
}

#[derive(Default)]
struct CacheMetrics {
    hits: AtomicUsize,
    misses: AtomicUsize,
    writes: AtomicUsize,
    errors: AtomicUsize,
}

/// 统计快照
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheStatsSnapshot {
    pub hits: usize,
    pub misses: usize,
    pub writes: usize,
    pub errors: usize,
    /// 命中率，无操作时为0
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.metrics.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.metrics.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_write(&self) {
        self.metrics.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.metrics.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CacheStatsSnapshot {
        let hits = self.metrics.hits.load(Ordering::Relaxed);
        let misses = self.metrics.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        CacheStatsSnapshot {
            hits,
            misses,
            writes: self.metrics.writes.load(Ordering::Relaxed),
            errors: self.metrics.errors.load(Ordering::Relaxed),
            hit_rate: if total > 0 {
                hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }
}

impl CacheStatsSnapshot {
    /// 生成一行统计摘要
    pub fn summary_line(&self) -> String {
        format!(
            "缓存统计 - 命中: {}, 未命中: {}, 写入: {}, 错误: {}, 命中率: {:.0}%",
            self.hits,
            self.misses,
            self.writes,
            self.errors,
            self.hit_rate * 100.0
        )
    }
}
