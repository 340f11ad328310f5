use crate::assistant::context::AssistantContext;

/// 研究阶段产物的内存作用域
pub struct MemoryScope;

impl MemoryScope {
    pub const RESEARCH: &'static str = "research";
    pub const SESSION: &'static str = "session";
}

/// 阶段产物键
pub struct StageKeys;

impl StageKeys {
    pub const REFINED: &'static str = "refined";
    pub const RAW: &'static str = "raw";
    pub const ANALYSIS: &'static str = "analysis";
    pub const VERIFIED: &'static str = "verified";
    pub const FINAL: &'static str = "final";
}

pub trait StageArtifacts {
    /// 存储阶段产物
    async fn store_stage(&self, key: &str, artifact: &str) -> anyhow::Result<()>;

    /// 获取阶段产物
    async fn get_stage(&self, key: &str) -> Option<String>;
}

impl StageArtifacts for AssistantContext {
    async fn store_stage(&self, key: &str, artifact: &str) -> anyhow::Result<()> {
        self.store_to_memory(MemoryScope::RESEARCH, key, artifact)
            .await
    }

    async fn get_stage(&self, key: &str) -> Option<String> {
        self.get_from_memory(MemoryScope::RESEARCH, key).await
    }
}
