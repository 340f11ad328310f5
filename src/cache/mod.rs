use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

use crate::config::CacheConfig;
use crate::error::ResearchError;
use crate::types::report::ResearchReport;
use crate::types::request::Depth;

pub mod stats;
pub use stats::{CacheStats, CacheStatsSnapshot};

/// 报告缓存管理器
///
/// 以归一化的 (topic, depth) 为键，一个条目一个JSON文件。无过期、
/// 无淘汰，无并发写协调（单用户单进程部署假设），条目在进程重启后
/// 仍然可用。
pub struct CacheManager {
    config: CacheConfig,
    stats: CacheStats,
}

/// 缓存条目
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheEntry {
    pub report: ResearchReport,
    pub cached_at: u64,
    /// 缓存键的MD5哈希值，用于文件名生成和校验
    pub key_digest: String,
}

impl CacheManager {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            stats: CacheStats::new(),
        }
    }

    /// 构造归一化缓存键：主题小写去空白后与深度拼接
    pub fn cache_key(topic: &str, depth: Depth) -> String {
        format!("{}|{}", topic.trim().to_lowercase(), depth)
    }

    /// 生成缓存键的MD5哈希
    fn hash_key(key: &str) -> String {
        let mut hasher = Md5::new();
        hasher.update(key.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 获取缓存文件路径
    fn entry_path(&self, key: &str) -> PathBuf {
        self.config
            .cache_dir
            .join("reports")
            .join(format!("{}.json", Self::hash_key(key)))
    }

    /// 读取缓存的报告
    ///
    /// 未命中返回 `Ok(None)`；条目损坏视为未命中；读文件失败返回
    /// `CacheIo`，由调用方按未命中降级。
    pub async fn get(
        &self,
        topic: &str,
        depth: Depth,
    ) -> Result<Option<ResearchReport>, ResearchError> {
        if !self.config.enabled {
            return Ok(None);
        }

        let key = Self::cache_key(topic, depth);
        let entry_path = self.entry_path(&key);

        if !entry_path.exists() {
            self.stats.record_miss();
            return Ok(None);
        }

        let content = fs::read_to_string(&entry_path).await.map_err(|e| {
            self.stats.record_error();
            ResearchError::cache(format!("读取缓存文件失败 {:?}: {}", entry_path, e))
        })?;

        match serde_json::from_str::<CacheEntry>(&content) {
            Ok(entry) => {
                self.stats.record_hit();
                println!("   💰 缓存命中 [{}] - 直接复用已完成的研究报告", key);
                Ok(Some(entry.report))
            }
            Err(e) => {
                // 条目损坏按未命中处理，管线会重新生成并覆盖
                self.stats.record_error();
                eprintln!("   ❌ 缓存条目损坏 [{}]: {}", key, e);
                Ok(None)
            }
        }
    }

    /// 写入完成的报告
    ///
    /// 只有管线完整成功产出的报告才会被写入，部分结果与错误结果从
    /// 不落盘。
    pub async fn put(&self, report: &ResearchReport) -> Result<(), ResearchError> {
        if !self.config.enabled {
            return Ok(());
        }

        let key = Self::cache_key(&report.source_request.topic, report.source_request.depth);
        let entry_path = self.entry_path(&key);

        if let Some(parent) = entry_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                self.stats.record_error();
                ResearchError::cache(format!("创建缓存目录失败 {:?}: {}", parent, e))
            })?;
        }

        let cached_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let entry = CacheEntry {
            report: report.clone(),
            cached_at,
            key_digest: Self::hash_key(&key),
        };

        let content = serde_json::to_string_pretty(&entry)
            .map_err(|e| ResearchError::cache(format!("序列化缓存条目失败: {}", e)))?;

        fs::write(&entry_path, content).await.map_err(|e| {
            self.stats.record_error();
            ResearchError::cache(format!("写入缓存文件失败 {:?}: {}", entry_path, e))
        })?;

        self.stats.record_write();
        println!("   💾 缓存写入 [{}] - 研究报告已落盘", key);
        Ok(())
    }

    /// 当前缓存运行统计
    pub fn stats_snapshot(&self) -> CacheStatsSnapshot {
        self.stats.snapshot()
    }
}
