use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{cache::CacheManager, config::Config, llm::client::LLMClient, memory::Memory};

/// 助手上下文
///
/// 取代模块级单例：配置、LLM客户端、缓存与会话内存由它显式持有并
/// 在各组件之间传递，生命周期与进程一致。
#[derive(Clone)]
pub struct AssistantContext {
    /// LLM调用器，用于与AI通信。
    pub llm_client: LLMClient,
    /// 配置
    pub config: Config,
    /// 报告缓存管理器
    pub cache_manager: Arc<RwLock<CacheManager>>,
    /// 会话内存
    pub memory: Arc<RwLock<Memory>>,
}

impl AssistantContext {
    /// 创建新的助手上下文
    pub fn new(config: Config) -> Result<Self> {
        let llm_client = LLMClient::new(config.clone())?;
        let cache_manager = Arc::new(RwLock::new(CacheManager::new(config.cache.clone())));
        let memory = Arc::new(RwLock::new(Memory::new()));

        Ok(Self {
            llm_client,
            config,
            cache_manager,
            memory,
        })
    }

    /// 存储数据到会话内存
    pub async fn store_to_memory<T>(&self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        let mut memory = self.memory.write().await;
        memory.store(scope, key, data)
    }

    /// 从会话内存获取数据
    pub async fn get_from_memory<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a> + Send + Sync,
    {
        let memory = self.memory.read().await;
        memory.get(scope, key)
    }

    /// 检查会话内存中是否存在指定数据
    pub async fn has_memory_data(&self, scope: &str, key: &str) -> bool {
        let memory = self.memory.read().await;
        memory.has_data(scope, key)
    }

    /// 清空指定作用域，会话重置时使用
    pub async fn clear_memory_scope(&self, scope: &str) {
        let mut memory = self.memory.write().await;
        memory.clear_scope(scope);
    }
}
