use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// 会话内存管理器
///
/// 按作用域组织的键值存储，用于在管线各阶段之间传递中间产物以及
/// 保存会话级上下文。生命周期与进程一致，不落盘。
#[derive(Debug, Default)]
pub struct Memory {
    data: HashMap<String, Value>,
    last_updated: Option<DateTime<Utc>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 存储数据到指定作用域和键
    pub fn store<T>(&mut self, scope: &str, key: &str, data: T) -> Result<()>
    where
        T: Serialize,
    {
        let full_key = format!("{}:{}", scope, key);
        let serialized = serde_json::to_value(data)?;

        self.data.insert(full_key, serialized);
        self.last_updated = Some(Utc::now());
        Ok(())
    }

    /// 从指定作用域和键获取数据
    pub fn get<T>(&self, scope: &str, key: &str) -> Option<T>
    where
        T: for<'a> Deserialize<'a>,
    {
        let full_key = format!("{}:{}", scope, key);
        self.data
            .get(&full_key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// 检查是否存在指定数据
    pub fn has_data(&self, scope: &str, key: &str) -> bool {
        let full_key = format!("{}:{}", scope, key);
        self.data.contains_key(&full_key)
    }

    /// 列出指定作用域的所有键
    pub fn list_keys(&self, scope: &str) -> Vec<String> {
        let prefix = format!("{}:", scope);
        self.data
            .keys()
            .filter(|key| key.starts_with(&prefix))
            .map(|key| key[prefix.len()..].to_string())
            .collect()
    }

    /// 清空指定作用域，会话重置时使用
    pub fn clear_scope(&mut self, scope: &str) {
        let prefix = format!("{}:", scope);
        self.data.retain(|key, _| !key.starts_with(&prefix));
        self.last_updated = Some(Utc::now());
    }

    /// 最近一次写入时间
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_get() {
        let mut memory = Memory::new();
        memory.store("research", "raw", "raw findings").unwrap();

        let value: Option<String> = memory.get("research", "raw");
        assert_eq!(value, Some("raw findings".to_string()));
    }

    #[test]
    fn test_scopes_are_isolated() {
        let mut memory = Memory::new();
        memory.store("research", "topic", "fintech").unwrap();

        assert!(memory.has_data("research", "topic"));
        assert!(!memory.has_data("session", "topic"));
    }

    #[test]
    fn test_list_keys() {
        let mut memory = Memory::new();
        memory.store("research", "raw", "a").unwrap();
        memory.store("research", "analysis", "b").unwrap();
        memory.store("session", "greeted", true).unwrap();

        let mut keys = memory.list_keys("research");
        keys.sort();
        assert_eq!(keys, vec!["analysis", "raw"]);
    }

    #[test]
    fn test_clear_scope() {
        let mut memory = Memory::new();
        memory.store("research", "raw", "a").unwrap();
        memory.store("session", "greeted", true).unwrap();

        memory.clear_scope("research");

        assert!(!memory.has_data("research", "raw"));
        assert!(memory.has_data("session", "greeted"));
    }

    #[test]
    fn test_get_missing_returns_none() {
        let memory = Memory::new();
        let value: Option<String> = memory.get("research", "missing");
        assert!(value.is_none());
    }
}
