use serde::{Deserialize, Serialize};

use crate::error::ResearchError;

/// 研究深度，决定委托管线的信息源数量与迭代强度
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Depth {
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "standard")]
    #[default]
    Standard,
    #[serde(rename = "detailed")]
    Detailed,
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Depth::Basic => write!(f, "basic"),
            Depth::Standard => write!(f, "standard"),
            Depth::Detailed => write!(f, "detailed"),
        }
    }
}

impl std::str::FromStr for Depth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Depth::Basic),
            "standard" => Ok(Depth::Standard),
            "detailed" => Ok(Depth::Detailed),
            _ => Err(format!("Unknown research depth: {}", s)),
        }
    }
}

impl Depth {
    /// 各深度档位对应的信息源预算
    pub fn source_budget(&self) -> usize {
        match self {
            Depth::Basic => 5,
            Depth::Standard => 10,
            Depth::Detailed => 20,
        }
    }

    /// 深度的提示词描述
    pub fn describe(&self) -> &'static str {
        match self {
            Depth::Basic => "a concise overview covering only the most important facts",
            Depth::Standard => "a balanced report covering the main aspects with supporting data",
            Depth::Detailed => {
                "an exhaustive deep-dive covering background, competitors, financials and outlook"
            }
        }
    }
}

/// 研究对象类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityType {
    #[serde(rename = "company")]
    Company,
    #[serde(rename = "keyword")]
    #[default]
    Keyword,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Company => write!(f, "company"),
            EntityType::Keyword => write!(f, "keyword"),
        }
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "company" => Ok(EntityType::Company),
            "keyword" | "topic" => Ok(EntityType::Keyword),
            _ => Err(format!("Unknown entity type: {}", s)),
        }
    }
}

/// 研究请求，构造后不可变
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResearchRequest {
    /// 研究主题或公司名称
    pub topic: String,

    /// 研究深度
    pub depth: Depth,

    /// 地域范围
    pub location: Option<String>,

    /// 时间范围
    pub timeframe: Option<String>,

    /// 对象类型
    pub entity_type: EntityType,
}

impl ResearchRequest {
    /// 以默认深度构造请求
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            depth: Depth::default(),
            location: None,
            timeframe: None,
            entity_type: EntityType::default(),
        }
    }

    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = entity_type;
        self
    }

    /// 主题归一化：小写并去除首尾空白，用于缓存键构造
    pub fn normalized_topic(&self) -> String {
        self.topic.trim().to_lowercase()
    }

    /// 校验请求参数。空主题在任何外部调用发起之前即失败
    pub fn validate(&self) -> Result<(), ResearchError> {
        if self.topic.trim().is_empty() {
            return Err(ResearchError::Validation(
                "research topic must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// 生成用于提示词的请求描述
    pub fn describe(&self) -> String {
        let mut parts = vec![
            format!("Subject: {}", self.topic.trim()),
            format!("Subject type: {}", self.entity_type),
            format!("Requested depth: {} ({})", self.depth, self.depth.describe()),
        ];
        parts.push(format!(
            "Geographical focus: {}",
            self.location.as_deref().unwrap_or("global")
        ));
        parts.push(format!(
            "Time frame: {}",
            self.timeframe.as_deref().unwrap_or("the past 2 years")
        ));
        parts.join("\n")
    }
}
